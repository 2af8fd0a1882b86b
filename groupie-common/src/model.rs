//! Catalog data model
//!
//! Wire shapes of the remote catalog API plus the in-memory [`Dataset`] they
//! are joined into. Records for dates, locations and relations arrive wrapped
//! in an [`IndexEnvelope`] and are re-keyed by artist identifier on load.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Artist identifier as published by the catalog (positive integer)
pub type ArtistId = u32;

/// Artist or band record from `/artists`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    /// Image URL
    pub image: String,
    /// Member names in catalog order (may carry stray whitespace)
    #[serde(default)]
    pub members: Vec<String>,
    /// Formation year
    pub creation_date: i32,
    /// First album label, free text (usually `dd-mm-yyyy`)
    pub first_album: String,
    /// Link to this artist's location record
    #[serde(default)]
    pub locations: String,
    /// Link to this artist's date record
    #[serde(default)]
    pub concert_dates: String,
    /// Link to this artist's relation record
    #[serde(default)]
    pub relations: String,
}

/// Concert dates for one artist, raw (e.g. `"*12-01-2019"`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateRecord {
    pub id: ArtistId,
    #[serde(default)]
    pub dates: Vec<String>,
}

/// Concert locations for one artist, raw (e.g. `"los_angeles-usa"`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocationRecord {
    pub id: ArtistId,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Raw location -> raw dates played there
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationRecord {
    pub id: ArtistId,
    /// Keyed by raw location; ordered so iteration is deterministic
    #[serde(default)]
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

/// `{"index": [...]}` wrapper used by the dates, locations and relation endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexEnvelope<T> {
    pub index: Vec<T>,
}

/// The whole catalog, joined by artist identifier
///
/// Built once and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Artists in catalog order
    pub artists: Vec<Artist>,
    pub dates: HashMap<ArtistId, Vec<String>>,
    pub locations: HashMap<ArtistId, Vec<String>>,
    pub relations: HashMap<ArtistId, RelationRecord>,
}

impl Dataset {
    /// Join the four decoded collections, keying records by their `id`.
    ///
    /// A later record with the same id replaces an earlier one.
    pub fn from_parts(
        artists: Vec<Artist>,
        dates: Vec<DateRecord>,
        locations: Vec<LocationRecord>,
        relations: Vec<RelationRecord>,
    ) -> Self {
        Self {
            artists,
            dates: dates.into_iter().map(|d| (d.id, d.dates)).collect(),
            locations: locations
                .into_iter()
                .map(|l| (l.id, l.locations))
                .collect(),
            relations: relations.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Find an artist by identifier
    pub fn artist(&self, id: ArtistId) -> Option<&Artist> {
        self.artists.iter().find(|a| a.id == id)
    }

    /// Raw concert dates for an artist (empty when the record is missing)
    pub fn dates_for(&self, id: ArtistId) -> &[String] {
        self.dates.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw concert locations for an artist (empty when the record is missing)
    pub fn locations_for(&self, id: ArtistId) -> &[String] {
        self.locations.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Which field of an artist a search hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SearchCategory {
    #[serde(rename = "artist/band")]
    ArtistBand,
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "creation date")]
    CreationDate,
    #[serde(rename = "first album")]
    FirstAlbum,
    #[serde(rename = "location")]
    Location,
}

/// One search suggestion: `{"name": ..., "type": ..., "id": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchItem {
    /// Matched text as stored in the catalog (not cleaned)
    pub name: String,
    #[serde(rename = "type")]
    pub category: SearchCategory,
    /// Owning artist
    pub id: ArtistId,
}

impl SearchItem {
    pub fn new(name: impl Into<String>, category: SearchCategory, id: ArtistId) -> Self {
        Self {
            name: name.into(),
            category,
            id,
        }
    }
}

/// Everything the artist page shows, with all text cleaned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub artist: Artist,
    /// Cleaned member names joined with `", "`
    pub members: String,
    /// Cleaned location -> cleaned dates, in relation order
    pub linked_concerts: BTreeMap<String, Vec<String>>,
    /// Cleaned concert dates
    pub dates: Vec<String>,
    /// Cleaned concert locations
    pub locations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_deserializes_catalog_field_names() {
        let json = r#"{
            "id": 1,
            "image": "https://example.test/queen.jpeg",
            "name": "Queen",
            "members": ["Freddie Mercury", "Brian May"],
            "creationDate": 1970,
            "firstAlbum": "14-12-1973",
            "locations": "https://example.test/api/locations/1",
            "concertDates": "https://example.test/api/dates/1",
            "relations": "https://example.test/api/relation/1"
        }"#;

        let artist: Artist = serde_json::from_str(json).unwrap();
        assert_eq!(artist.id, 1);
        assert_eq!(artist.members.len(), 2);
        assert_eq!(artist.creation_date, 1970);
        assert_eq!(artist.first_album, "14-12-1973");
        assert_eq!(artist.concert_dates, "https://example.test/api/dates/1");
    }

    #[test]
    fn test_relation_envelope_deserializes() {
        let json = r#"{"index": [
            {"id": 2, "datesLocations": {"new_york-usa": ["*01-01-2020", "02-01-2020"]}}
        ]}"#;

        let envelope: IndexEnvelope<RelationRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.index.len(), 1);
        assert_eq!(
            envelope.index[0].dates_locations["new_york-usa"],
            vec!["*01-01-2020".to_string(), "02-01-2020".to_string()]
        );
    }

    #[test]
    fn test_from_parts_keys_records_by_id() {
        let dataset = Dataset::from_parts(
            Vec::new(),
            vec![DateRecord {
                id: 3,
                dates: vec!["*01-02-2003".into()],
            }],
            vec![LocationRecord {
                id: 3,
                locations: vec!["paris-france".into()],
            }],
            vec![RelationRecord {
                id: 3,
                dates_locations: BTreeMap::new(),
            }],
        );

        assert_eq!(dataset.dates_for(3), ["*01-02-2003".to_string()]);
        assert_eq!(dataset.locations_for(3), ["paris-france".to_string()]);
        assert!(dataset.relations.contains_key(&3));
        assert!(dataset.dates_for(4).is_empty());
    }

    #[test]
    fn test_search_item_wire_shape() {
        let item = SearchItem::new("Queen", SearchCategory::ArtistBand, 1);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Queen", "type": "artist/band", "id": 1})
        );

        let labels: Vec<_> = [
            SearchCategory::Member,
            SearchCategory::CreationDate,
            SearchCategory::FirstAlbum,
            SearchCategory::Location,
        ]
        .into_iter()
        .map(|category| serde_json::to_value(category).unwrap())
        .collect();
        assert_eq!(
            labels,
            ["member", "creation date", "first album", "location"]
        );
    }

    #[test]
    fn test_search_items_round_trip_in_order() {
        let items = vec![
            SearchItem::new("Queen", SearchCategory::ArtistBand, 1),
            SearchItem::new("Freddie Mercury", SearchCategory::Member, 1),
            SearchItem::new("1970", SearchCategory::CreationDate, 1),
            SearchItem::new("14-12-1973", SearchCategory::FirstAlbum, 1),
            SearchItem::new("london-uk", SearchCategory::Location, 1),
        ];

        let json = serde_json::to_string(&items).unwrap();
        let parsed: Vec<SearchItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, items);
    }
}
