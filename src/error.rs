// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Hard failures only. Malformed page content never ends up here; the parsers
/// leave fields unset instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("a patent number is required (at least 4 characters)")]
    MissingIdentifier,

    #[error("HTTP client unavailable: {0}")]
    ClientUnavailable(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("document from {url} too short: {len} bytes (minimum {min})")]
    ShortDocument { url: String, len: usize, min: usize },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("search query has no terms")]
    EmptyQuery,

    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("record (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
