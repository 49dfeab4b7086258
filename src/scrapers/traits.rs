use crate::error::FetchError;
use crate::models::RawListing;
use crate::scrapers::credentials::CredentialBundle;
use anyhow::Result;
use async_trait::async_trait;

/// What happened when one page was requested
#[derive(Debug)]
pub struct PageOutcome {
    pub page: u32,
    /// Requests actually sent for this page
    pub attempts: u32,
    pub result: std::result::Result<Vec<RawListing>, FetchError>,
}

/// Source of listing pages.
/// The crawl orchestrator only sees this, so tests can swap in canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single 1-based page. Never panics on remote failures;
    /// they come back inside the outcome.
    async fn fetch(&self, page: u32) -> PageOutcome;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}

/// Supplies the credential bundle for a run.
/// Session acquisition (browser automation, manual copy) lives behind this.
pub trait CredentialProvider {
    fn credentials(&self) -> Result<CredentialBundle>;
}
