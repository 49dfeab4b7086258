use chrono::NaiveDate;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::scrapers::{RetryPolicy, SearchParams};

pub const DEFAULT_BASE_URL: &str = "https://new.land.naver.com";

/// Everything one crawl run needs. Secrets live in the credential bundle, not here.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: String,
    pub search: SearchParams,
    /// Human-readable complex name used in the snapshot file name
    pub complex_label: String,
    pub data_folder: PathBuf,
    pub first_page: u32,
    pub last_page: u32,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    /// Pause between consecutive pages
    pub page_delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search: SearchParams::default(),
            complex_label: "센텀팰리스".to_string(),
            data_folder: PathBuf::from("data"),
            first_page: 1,
            last_page: 5,
            max_retries: 3,
            retry_delay: Duration::from_secs(3),
            request_timeout: Duration::from_secs(10),
            page_delay: Duration::ZERO,
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_page == 0 {
            return Err(ConfigError::FirstPageZero);
        }
        if self.first_page > self.last_page {
            return Err(ConfigError::EmptyRange {
                first: self.first_page,
                last: self.last_page,
            });
        }
        if self.max_retries == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries,
            delay: self.retry_delay,
        }
    }

    /// `{data_folder}/{label}_{trade}_{YYYY-MM-DD}.csv`
    pub fn snapshot_path(&self, run_date: NaiveDate) -> PathBuf {
        self.data_folder.join(format!(
            "{}_{}_{}.csv",
            self.complex_label,
            self.search.trade_type.label(),
            run_date.format("%Y-%m-%d")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::TradeType;

    #[test]
    fn defaults_are_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pages().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn rejects_bad_ranges() {
        let config = CrawlConfig {
            first_page: 0,
            ..CrawlConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FirstPageZero)));

        let config = CrawlConfig {
            first_page: 4,
            last_page: 2,
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRange { first: 4, last: 2 })
        ));

        let config = CrawlConfig {
            max_retries: 0,
            ..CrawlConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoAttempts)));
    }

    #[test]
    fn snapshot_path_is_dated() {
        let config = CrawlConfig::default();
        let date = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();

        assert_eq!(
            config.snapshot_path(date),
            PathBuf::from("data/센텀팰리스_전세_2025-02-15.csv")
        );

        let mut sale = CrawlConfig::default();
        sale.search.trade_type = TradeType::Sale;
        assert!(sale
            .snapshot_path(date)
            .ends_with("센텀팰리스_매매_2025-02-15.csv"));
    }
}
