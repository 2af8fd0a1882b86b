//! Remote catalog: fetching, the shared dataset, and the read paths over it

pub mod client;
pub mod detail;
pub mod search;
pub mod store;

pub use client::{CatalogClient, CatalogSource, FetchError};
pub use detail::assemble;
pub use search::search;
pub use store::{CatalogStore, CatalogUnavailable};
