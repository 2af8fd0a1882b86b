//! HTTP API handlers for groupie-web

pub mod fallback;
pub mod health;
pub mod pages;
pub mod query;
pub mod search;

pub use fallback::{method_not_allowed, not_found};
pub use health::health_routes;
pub use pages::{artist_page, home_page};
pub use search::search_suggestions;
