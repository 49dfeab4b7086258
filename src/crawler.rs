use chrono::NaiveDate;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::CrawlConfig;
use crate::error::SnapshotError;
use crate::models::{CrawlResult, NormalizedListing};
use crate::output::SnapshotWriter;
use crate::scrapers::PageFetcher;

/// Walks a page range and collects normalized listings.
///
/// A failing page is logged and skipped; it never ends the run.
pub struct CrawlOrchestrator<F> {
    fetcher: F,
    run_date: NaiveDate,
    page_delay: Duration,
}

impl<F: PageFetcher> CrawlOrchestrator<F> {
    pub fn new(fetcher: F, run_date: NaiveDate) -> Self {
        Self {
            fetcher,
            run_date,
            page_delay: Duration::ZERO,
        }
    }

    /// Wait between consecutive pages
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub async fn run(&self, pages: RangeInclusive<u32>) -> CrawlResult {
        let mut result = CrawlResult::default();

        info!(
            "Starting {} crawl for pages {}..={}",
            self.fetcher.source_name(),
            pages.start(),
            pages.end()
        );

        for page in pages {
            if result.pages_requested > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
            result.pages_requested += 1;

            let outcome = self.fetcher.fetch(page).await;
            match outcome.result {
                Ok(raw) => {
                    result.pages_succeeded += 1;
                    if raw.is_empty() {
                        info!(page, "❌ No listings on page");
                    }
                    result.listings.extend(
                        raw.iter()
                            .map(|listing| NormalizedListing::from_raw(listing, self.run_date)),
                    );
                }
                Err(e) => {
                    result.pages_failed += 1;
                    warn!(page, attempts = outcome.attempts, "Skipping page: {}", e);
                }
            }
        }

        info!(
            listings = result.len(),
            succeeded = result.pages_succeeded,
            failed = result.pages_failed,
            "Crawl finished"
        );

        result
    }
}

/// Summary of one crawl-and-save run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub listings: usize,
    pub pages_succeeded: u32,
    pub pages_failed: u32,
    /// Where the snapshot went; `None` when no page of the range succeeded
    pub output: Option<PathBuf>,
}

/// Crawl the configured page range and persist the snapshot.
///
/// When every page fails nothing is written and the report carries no
/// output path. Pages that succeed with zero listings still produce a
/// header-only file.
pub async fn crawl_to_snapshot<F: PageFetcher>(
    fetcher: F,
    config: &CrawlConfig,
    run_date: NaiveDate,
) -> Result<RunReport, SnapshotError> {
    let orchestrator = CrawlOrchestrator::new(fetcher, run_date).with_page_delay(config.page_delay);
    let result = orchestrator.run(config.pages()).await;

    let output = if result.any_page_succeeded() {
        let path = config.snapshot_path(run_date);
        SnapshotWriter::new().write(&result, &path).await?;
        Some(path)
    } else {
        warn!("❌ No page returned data; nothing to save");
        None
    };

    Ok(RunReport {
        listings: result.len(),
        pages_succeeded: result.pages_succeeded,
        pages_failed: result.pages_failed,
        output,
    })
}
