//! Artist detail view
//!
//! Joins one artist with its dates, locations and location -> dates
//! relation, cleaning every string on the way out.

use groupie_common::model::ArtistId;
use groupie_common::{clean, ArtistDetail, Dataset};
use std::collections::BTreeMap;

/// Build the detail view for `id`, or `None` if no artist has that id.
///
/// Missing date, location or relation records are treated as empty. Two raw
/// locations that clean to the same text share one entry, their dates
/// appended in relation order.
pub fn assemble(dataset: &Dataset, id: ArtistId) -> Option<ArtistDetail> {
    let artist = dataset.artist(id)?;

    let dates = dataset.dates_for(id).iter().map(|d| clean(d)).collect();
    let locations = dataset.locations_for(id).iter().map(|l| clean(l)).collect();

    let mut linked_concerts: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(relation) = dataset.relations.get(&id) {
        for (location, location_dates) in &relation.dates_locations {
            linked_concerts
                .entry(clean(location))
                .or_default()
                .extend(location_dates.iter().map(|d| clean(d)));
        }
    }

    let members = artist
        .members
        .iter()
        .map(|m| clean(m.trim()))
        .collect::<Vec<_>>()
        .join(", ");

    Some(ArtistDetail {
        artist: artist.clone(),
        members,
        linked_concerts,
        dates,
        locations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupie_common::model::{DateRecord, LocationRecord, RelationRecord};
    use groupie_common::Artist;

    fn artist(id: u32, members: &[&str]) -> Artist {
        Artist {
            id,
            name: format!("Artist {}", id),
            image: format!("https://example.test/{}.jpeg", id),
            members: members.iter().map(|m| m.to_string()).collect(),
            creation_date: 1999,
            first_album: "01-01-2000".to_string(),
            locations: String::new(),
            concert_dates: String::new(),
            relations: String::new(),
        }
    }

    fn relation(id: u32, entries: Vec<(&str, Vec<&str>)>) -> RelationRecord {
        RelationRecord {
            id,
            dates_locations: entries
                .into_iter()
                .map(|(loc, dates)| {
                    (
                        loc.to_string(),
                        dates.iter().map(|d| d.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_assemble_known_artist() {
        let dataset = Dataset::from_parts(
            vec![artist(5, &["Al_ice", " Bob "])],
            vec![DateRecord {
                id: 5,
                dates: vec!["*01-01-2020".to_string()],
            }],
            vec![LocationRecord {
                id: 5,
                locations: vec!["new_york".to_string()],
            }],
            vec![relation(5, vec![("new_york", vec!["01-01-2020"])])],
        );

        let detail = assemble(&dataset, 5).expect("artist 5 exists");

        assert_eq!(detail.artist.id, 5);
        assert_eq!(detail.members, "Al ice, Bob");
        assert_eq!(detail.dates, vec!["01-01-2020".to_string()]);
        assert_eq!(detail.locations, vec!["new york".to_string()]);

        let mut expected = BTreeMap::new();
        expected.insert("new york".to_string(), vec!["01-01-2020".to_string()]);
        assert_eq!(detail.linked_concerts, expected);
    }

    #[test]
    fn test_assemble_unknown_artist_is_none() {
        let dataset = Dataset::from_parts(vec![artist(1, &[])], Vec::new(), Vec::new(), Vec::new());
        assert!(assemble(&dataset, 2).is_none());
        assert!(assemble(&dataset, 0).is_none());
    }

    #[test]
    fn test_missing_records_are_empty() {
        let dataset = Dataset::from_parts(vec![artist(9, &["Solo"])], Vec::new(), Vec::new(), Vec::new());

        let detail = assemble(&dataset, 9).unwrap();
        assert!(detail.dates.is_empty());
        assert!(detail.locations.is_empty());
        assert!(detail.linked_concerts.is_empty());
        assert_eq!(detail.members, "Solo");
    }

    #[test]
    fn test_locations_cleaning_to_same_key_are_concatenated() {
        let dataset = Dataset::from_parts(
            vec![artist(4, &[])],
            Vec::new(),
            Vec::new(),
            vec![relation(
                4,
                vec![
                    ("*paris", vec!["*01-01-2020", "02-01-2020"]),
                    ("paris", vec!["01-01-2020"]),
                ],
            )],
        );

        let detail = assemble(&dataset, 4).unwrap();
        assert_eq!(detail.linked_concerts.len(), 1);
        assert_eq!(
            detail.linked_concerts["paris"],
            vec![
                "01-01-2020".to_string(),
                "02-01-2020".to_string(),
                "01-01-2020".to_string(),
            ]
        );
    }

    #[test]
    fn test_assemble_does_not_modify_dataset() {
        let dataset = Dataset::from_parts(
            vec![artist(3, &[])],
            vec![DateRecord {
                id: 3,
                dates: vec!["*05-05-2005".to_string()],
            }],
            vec![LocationRecord {
                id: 3,
                locations: vec!["los_angeles-usa".to_string()],
            }],
            Vec::new(),
        );
        let before = dataset.clone();

        let _ = assemble(&dataset, 3);
        assert_eq!(dataset, before);
    }
}
