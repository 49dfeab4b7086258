use thiserror::Error;

/// Why a single page could not be turned into listings
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("status {status} persisted after {attempts} attempts")]
    RetriesExhausted { status: u16, attempts: u32 },

    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid page number {0}, pages start at 1")]
    InvalidPage(u32),
}

/// Failure to persist a snapshot file
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Credential values that cannot be sent as HTTP headers
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("invalid header name '{0}'")]
    HeaderName(String),

    #[error("invalid value for header '{0}'")]
    HeaderValue(String),
}

/// Rejected run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("first page must be at least 1")]
    FirstPageZero,

    #[error("first page {first} is after last page {last}")]
    EmptyRange { first: u32, last: u32 },

    #[error("max retries must be at least 1")]
    NoAttempts,

    #[error("unknown trade type '{0}'")]
    TradeType(String),
}
