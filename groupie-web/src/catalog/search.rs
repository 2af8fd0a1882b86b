//! Search suggestions
//!
//! Case-insensitive substring match over every artist's name, members,
//! creation year, first album and concert locations.

use groupie_common::{Dataset, SearchCategory, SearchItem};

/// All fields matching `query`, in catalog order.
///
/// Per artist the fields are checked as name, members, creation year, first
/// album, locations. Hits carry the stored (uncleaned) text. Nothing is
/// ranked or deduplicated, and an empty query matches every field.
pub fn search(dataset: &Dataset, query: &str) -> Vec<SearchItem> {
    let query = query.to_lowercase();
    let matches = |text: &str| text.to_lowercase().contains(&query);

    let mut items = Vec::new();

    for artist in &dataset.artists {
        if matches(&artist.name) {
            items.push(SearchItem::new(&artist.name, SearchCategory::ArtistBand, artist.id));
        }

        for member in &artist.members {
            if matches(member) {
                items.push(SearchItem::new(member, SearchCategory::Member, artist.id));
            }
        }

        let year = artist.creation_date.to_string();
        if matches(&year) {
            items.push(SearchItem::new(year, SearchCategory::CreationDate, artist.id));
        }

        if matches(&artist.first_album) {
            items.push(SearchItem::new(&artist.first_album, SearchCategory::FirstAlbum, artist.id));
        }

        for location in dataset.locations_for(artist.id) {
            if matches(location) {
                items.push(SearchItem::new(location, SearchCategory::Location, artist.id));
            }
        }
    }

    items
}
