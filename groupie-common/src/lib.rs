//! # Groupie Tracker Common Library
//!
//! Shared code for the groupie-tracker service:
//! - Catalog data model (artists, dates, locations, relations)
//! - Search result types
//! - Text normalization for catalog strings
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod model;
pub mod text;

pub use error::{Error, Result};
pub use model::{Artist, ArtistDetail, Dataset, SearchCategory, SearchItem};
pub use text::clean;
