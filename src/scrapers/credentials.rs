use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE, REFERER, USER_AGENT};
use std::env;
use tracing::warn;

use crate::error::CredentialError;
use crate::scrapers::traits::CredentialProvider;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

/// Cookies and tokens that authenticate requests against the listings API.
///
/// Obtained outside this crate (a browser session, a `.env` file) and
/// never mutated during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialBundle {
    /// Raw `Cookie` header value, e.g. `NNB=...; NID_AUT=...`
    pub cookie: Option<String>,
    /// Bearer token, with or without the `Bearer ` prefix
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub extra_headers: Vec<(String, String)>,
}

impl CredentialBundle {
    pub fn is_empty(&self) -> bool {
        self.cookie.is_none() && self.authorization.is_none() && self.extra_headers.is_empty()
    }

    /// Build the header map sent with every page request
    pub fn to_headers(&self) -> std::result::Result<HeaderMap, CredentialError> {
        let mut headers = HeaderMap::new();

        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(USER_AGENT, header_value("user-agent", user_agent)?);

        if let Some(referer) = &self.referer {
            headers.insert(REFERER, header_value("referer", referer)?);
        }

        if let Some(cookie) = &self.cookie {
            headers.insert(COOKIE, header_value("cookie", cookie)?);
        }

        if let Some(token) = &self.authorization {
            let token = token.trim();
            let bearer = if token.starts_with("Bearer ") {
                token.to_string()
            } else {
                format!("Bearer {}", token)
            };
            headers.insert(AUTHORIZATION, header_value("authorization", &bearer)?);
        }

        for (name, value) in &self.extra_headers {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| CredentialError::HeaderName(name.clone()))?;
            headers.insert(header, header_value(name, value)?);
        }

        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> std::result::Result<HeaderValue, CredentialError> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| CredentialError::HeaderValue(name.to_string()))?;
    if matches!(name, "cookie" | "authorization") {
        value.set_sensitive(true);
    }
    Ok(value)
}

/// Reads credentials from `LAND_*` environment variables, loading `.env` first
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    pub const COOKIE: &'static str = "LAND_COOKIE";
    pub const AUTHORIZATION: &'static str = "LAND_AUTHORIZATION";
    pub const USER_AGENT: &'static str = "LAND_USER_AGENT";
    pub const REFERER: &'static str = "LAND_REFERER";
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Result<CredentialBundle> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let bundle = CredentialBundle {
            cookie: non_empty_var(Self::COOKIE),
            authorization: non_empty_var(Self::AUTHORIZATION),
            user_agent: non_empty_var(Self::USER_AGENT),
            referer: non_empty_var(Self::REFERER),
            extra_headers: Vec::new(),
        };

        if bundle.is_empty() {
            warn!(
                "No credentials found in {} / {}; requests will be sent unauthenticated",
                Self::COOKIE,
                Self::AUTHORIZATION
            );
        }

        Ok(bundle)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
