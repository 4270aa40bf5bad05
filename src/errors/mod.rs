// src/errors/mod.rs
use thiserror::Error;

/// Fatal error type for a smoke run.
///
/// Anything surfacing as a `SmokeError` aborts the run before check results
/// are recorded. Per-check failures are not errors; see [`crate::checks::CheckOutcome`].
#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("Invalid header value: {0}")]
    HeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Login failed: HTTP {status} | Body: {body}")]
    LoginFailed { status: u16, body: String },

    #[error("Login response has no usable 'token': {0}")]
    MissingToken(String),
}

/// Convenience Result type that uses SmokeError
pub type Result<T> = std::result::Result<T, SmokeError>;
