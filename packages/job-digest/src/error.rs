//! Typed errors for the job-digest library.
//!
//! Source failures are recovered by the collector (logged, zero records);
//! only configuration and report-writing errors reach the binary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Fatal for the adapter that needs the credential, not for the run.
    #[error("{var} is not set")]
    MissingCredential { var: String },
}

/// Errors raised while fetching from a single source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("JSearch: {0}")]
    JSearch(#[from] jsearch_client::JSearchError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

pub type ReportResult<T> = std::result::Result<T, ReportError>;
