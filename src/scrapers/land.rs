use crate::config::CrawlConfig;
use crate::error::{ConfigError, FetchError};
use crate::models::RawListing;
use crate::scrapers::credentials::CredentialBundle;
use crate::scrapers::traits::{PageFetcher, PageOutcome};
use crate::scrapers::types::SearchParams;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fixed-delay retry budget for transient statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total requests allowed per page, first one included
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(3),
        }
    }
}

/// Statuses that usually clear up on their own: an expiring session
/// (401/403) or an edge timeout (504).
pub fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Complex listings API client
pub struct LandApiFetcher {
    client: Client,
    endpoint: String,
    params: SearchParams,
    retry: RetryPolicy,
}

impl LandApiFetcher {
    /// Create a fetcher for the complex and filters in `config`
    pub fn new(config: &CrawlConfig, credentials: &CredentialBundle) -> Result<Self> {
        Self::with_params(
            &config.base_url,
            config.search.clone(),
            credentials,
            config.retry_policy(),
            config.request_timeout,
        )
    }

    /// Create a fetcher against an arbitrary base URL
    pub fn with_params(
        base_url: &str,
        params: SearchParams,
        credentials: &CredentialBundle,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self> {
        if retry.max_attempts == 0 {
            return Err(ConfigError::NoAttempts.into());
        }

        let base_url = base_url.trim_end_matches('/');

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        // Credential headers override the defaults above
        let credential_headers = credentials
            .to_headers()
            .context("Credential bundle cannot be sent as headers")?;
        for (name, value) in &credential_headers {
            headers.insert(name.clone(), value.clone());
        }
        if !headers.contains_key(REFERER) {
            let referer = format!("{}/complexes/{}", base_url, params.complex_no);
            headers.insert(
                REFERER,
                HeaderValue::from_str(&referer).context("Invalid referer derived from base URL")?,
            );
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = format!("{}/api/articles/complex/{}", base_url, params.complex_no);

        Ok(Self {
            client,
            endpoint,
            params,
            retry,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn read_listings(&self, response: Response) -> std::result::Result<Vec<RawListing>, FetchError> {
        let body = response.text().await?;
        debug!("Downloaded {} bytes of JSON", body.len());
        parse_article_list(&body)
    }
}

/// Extract `articleList` from a response body.
///
/// A missing or null `articleList` is an empty page. Invalid JSON, a
/// non-object body, or a list holding non-objects is malformed.
pub fn parse_article_list(body: &str) -> std::result::Result<Vec<RawListing>, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let Value::Object(mut root) = value else {
        return Err(FetchError::MalformedResponse(
            "response body is not a JSON object".to_string(),
        ));
    };

    match root.remove("articleList") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(RawListing(map)),
                _ => Err(FetchError::MalformedResponse(format!(
                    "articleList[{}] is not an object",
                    i
                ))),
            })
            .collect(),
        Some(_) => Err(FetchError::MalformedResponse(
            "articleList is not an array".to_string(),
        )),
    }
}

#[async_trait]
impl PageFetcher for LandApiFetcher {
    async fn fetch(&self, page: u32) -> PageOutcome {
        if page == 0 {
            return PageOutcome {
                page,
                attempts: 0,
                result: Err(FetchError::InvalidPage(page)),
            };
        }

        let query = self.params.page(page).query_pairs();
        let mut attempts = 0;

        let result = loop {
            attempts += 1;
            debug!(page, attempt = attempts, "Fetching URL: {}", self.endpoint);

            let response = match self.client.get(&self.endpoint).query(&query).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!(page, attempt = attempts, "Request failed: {}", e);
                    break Err(FetchError::Transport(e));
                }
            };

            let status = response.status();
            info!(page, attempt = attempts, status = status.as_u16(), "Page responded");

            if status == StatusCode::OK {
                break self.read_listings(response).await;
            }

            if !is_transient(status) {
                warn!(page, status = status.as_u16(), "Non-retryable status");
                break Err(FetchError::Http {
                    status: status.as_u16(),
                });
            }

            if attempts >= self.retry.max_attempts {
                break Err(FetchError::RetriesExhausted {
                    status: status.as_u16(),
                    attempts,
                });
            }

            warn!(
                page,
                attempt = attempts,
                status = status.as_u16(),
                "Transient status, retrying in {:?}",
                self.retry.delay
            );
            tokio::time::sleep(self.retry.delay).await;
        };

        if let Ok(listings) = &result {
            info!(page, listings = listings.len(), "Page parsed");
        }

        PageOutcome {
            page,
            attempts,
            result,
        }
    }

    fn source_name(&self) -> &'static str {
        "Naver Land"
    }
}
