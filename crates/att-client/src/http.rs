//! REST backend client.

use std::fmt;
use std::time::Duration;

use att_core::{ClockEvent, DateRange, Device};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::wire::{DeviceRecord, EventRecord, Listing, devices_from_records, events_from_records};
use crate::{ClockEventSource, SourceError};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Attendance backend client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s), if the token is blank, or
    /// if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, SourceError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SourceError::InvalidBaseUrl {
                url: base_url,
                reason: "base URL cannot be empty",
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SourceError::InvalidBaseUrl {
                url: base_url,
                reason: "base URL must start with http:// or https://",
            });
        }
        if token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(SourceError::InvalidToken {
                reason: "API token cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(SourceError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn attendance_url(&self, company_id: &str) -> String {
        format!("{}/companies/{company_id}/attendance", self.base_url)
    }

    fn devices_url(&self, company_id: &str) -> String {
        format!("{}/companies/{company_id}/devices", self.base_url)
    }

    async fn get_listing<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, SourceError> {
        let mut request = self.http.get(url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &body).unwrap_or_else(|| {
                SourceError::Api {
                    status: status.as_u16(),
                    message: body,
                }
            }));
        }

        let listing: Listing<T> = serde_json::from_str(&body)
            .map_err(|err| SourceError::InvalidResponse(err.to_string()))?;
        let items = listing.into_vec();
        tracing::debug!(url, count = items.len(), "fetched listing");
        Ok(items)
    }

    async fn events(
        &self,
        company_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<ClockEvent>, SourceError> {
        let records: Vec<EventRecord> = self
            .get_listing(&self.attendance_url(company_id), query)
            .await?;
        events_from_records(records)
    }
}

impl ClockEventSource for HttpSource {
    async fn fetch_events_for_date(
        &self,
        company_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ClockEvent>, SourceError> {
        self.events(company_id, &[("date", date.format(DATE_FORMAT).to_string())])
            .await
    }

    async fn fetch_events_for_range(
        &self,
        company_id: &str,
        range: DateRange,
    ) -> Result<Vec<ClockEvent>, SourceError> {
        self.events(
            company_id,
            &[
                ("start", range.start().format(DATE_FORMAT).to_string()),
                ("end", range.end().format(DATE_FORMAT).to_string()),
            ],
        )
        .await
    }

    async fn fetch_devices(&self, company_id: &str) -> Result<Vec<Device>, SourceError> {
        let records: Vec<DeviceRecord> = self
            .get_listing(&self.devices_url(company_id), &[])
            .await?;
        devices_from_records(records)
    }
}

fn parse_api_error(status: u16, body: &str) -> Option<SourceError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        #[serde(alias = "error")]
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| SourceError::Api {
            status,
            message: payload.message,
        })
}
