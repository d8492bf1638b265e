//! Forecast ingestion and cache store for Tenki.
//!
//! Fetches regional forecasts from the JMA forecast API, flattens them into
//! per-date records and keeps them in a SQLite read-through cache.

pub mod catalog;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod payload;
pub mod service;
pub mod store;
pub mod types;

pub use catalog::{all_areas, find_area, list_regions, Area, Region};
pub use error::ForecastError;
pub use fetcher::ForecastFetcher;
pub use normalize::{normalize, TEMP_SENTINEL};
pub use payload::RawForecastPayload;
pub use service::ForecastService;
pub use store::ForecastStore;
pub use types::*;
