//! Clock event sources for the attendance engine.
//!
//! Provides:
//! - [`ClockEventSource`]: the fetch interface the reports consume
//! - [`HttpSource`]: the company's REST backend
//! - [`FileSource`]: a JSON export on disk, for offline reports

use std::future::Future;
use std::path::PathBuf;

use att_core::{ClockEvent, DateRange, Device};
use chrono::NaiveDate;
use thiserror::Error;

mod file;
mod http;
pub mod wire;

pub use file::{FileSource, Snapshot};
pub use http::HttpSource;

/// Event source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The provided API token was invalid.
    #[error("invalid API token: {reason}")]
    InvalidToken { reason: &'static str },
    /// The base URL is unusable.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Backend returned an error response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// Failed to decode a response or file.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A record failed validation.
    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    /// Failed to read a source file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies raw attendance events and the device roster for a company.
///
/// Implementations return the complete set for the requested dates; the
/// reports never start on partial input.
pub trait ClockEventSource {
    fn fetch_events_for_date(
        &self,
        company_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<ClockEvent>, SourceError>> + Send;

    fn fetch_events_for_range(
        &self,
        company_id: &str,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<ClockEvent>, SourceError>> + Send;

    fn fetch_devices(
        &self,
        company_id: &str,
    ) -> impl Future<Output = Result<Vec<Device>, SourceError>> + Send;
}
