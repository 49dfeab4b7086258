//! Land Scout: collects lease listings for one apartment complex from the
//! Naver Land listings API and keeps a dated CSV snapshot per run.

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod output;
pub mod price;
pub mod scrapers;

pub use config::CrawlConfig;
pub use crawler::CrawlOrchestrator;
pub use error::{ConfigError, CredentialError, FetchError, SnapshotError};
pub use models::{CrawlResult, NormalizedListing, RawListing};
pub use output::SnapshotWriter;
pub use price::parse_price;
