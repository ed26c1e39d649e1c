//! Picks the event source for a run.

use std::path::Path;

use anyhow::{Context, Result, bail};
use att_client::{ClockEventSource, FileSource, HttpSource, SourceError};
use att_core::{ClockEvent, DateRange, Device};
use chrono::NaiveDate;

use crate::Config;

/// Company ID used when reading a snapshot file without one configured.
const SNAPSHOT_COMPANY: &str = "local";

/// Either the REST backend or a local snapshot.
#[derive(Debug)]
pub enum AnySource {
    Http(HttpSource),
    File(FileSource),
}

impl AnySource {
    /// A snapshot file wins over a configured backend.
    pub fn from_config(config: &Config, events_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = events_file {
            tracing::debug!(path = ?path, "using snapshot file as event source");
            return Ok(Self::File(FileSource::new(path)));
        }
        let Some(base_url) = &config.base_url else {
            bail!("no event source configured: set base_url in config or pass --events-file");
        };
        let http = HttpSource::new(base_url.clone(), config.api_token.clone())
            .context("failed to create backend client")?;
        Ok(Self::Http(http))
    }

    /// Resolves the company: CLI flag, then config, then (for files) a
    /// placeholder.
    pub fn company_id(&self, flag: Option<&str>, config: &Config) -> Result<String> {
        if let Some(company) = flag.or(config.company_id.as_deref()) {
            return Ok(company.to_string());
        }
        match self {
            Self::File(_) => Ok(SNAPSHOT_COMPANY.to_string()),
            Self::Http(_) => bail!("no company configured: set company_id or pass --company"),
        }
    }
}

impl ClockEventSource for AnySource {
    async fn fetch_events_for_date(
        &self,
        company_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ClockEvent>, SourceError> {
        match self {
            Self::Http(s) => s.fetch_events_for_date(company_id, date).await,
            Self::File(s) => s.fetch_events_for_date(company_id, date).await,
        }
    }

    async fn fetch_events_for_range(
        &self,
        company_id: &str,
        range: DateRange,
    ) -> Result<Vec<ClockEvent>, SourceError> {
        match self {
            Self::Http(s) => s.fetch_events_for_range(company_id, range).await,
            Self::File(s) => s.fetch_events_for_range(company_id, range).await,
        }
    }

    async fn fetch_devices(&self, company_id: &str) -> Result<Vec<Device>, SourceError> {
        match self {
            Self::Http(s) => s.fetch_devices(company_id).await,
            Self::File(s) => s.fetch_devices(company_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_file_takes_precedence() {
        let config = Config {
            base_url: Some("https://api.example.com".to_string()),
            ..Config::default()
        };
        let source = AnySource::from_config(&config, Some(Path::new("events.json"))).unwrap();
        assert!(matches!(source, AnySource::File(_)));
    }

    #[test]
    fn missing_source_is_an_error() {
        let err = AnySource::from_config(&Config::default(), None).unwrap_err();
        assert!(err.to_string().contains("no event source configured"));
    }

    #[test]
    fn company_flag_overrides_config() {
        let config = Config {
            base_url: Some("https://api.example.com".to_string()),
            company_id: Some("from-config".to_string()),
            ..Config::default()
        };
        let source = AnySource::from_config(&config, None).unwrap();
        assert_eq!(source.company_id(Some("flag"), &config).unwrap(), "flag");
        assert_eq!(source.company_id(None, &config).unwrap(), "from-config");
    }

    #[test]
    fn backend_requires_company() {
        let config = Config {
            base_url: Some("https://api.example.com".to_string()),
            ..Config::default()
        };
        let source = AnySource::from_config(&config, None).unwrap();
        assert!(source.company_id(None, &config).is_err());

        let file = AnySource::File(FileSource::new("events.json"));
        assert_eq!(file.company_id(None, &config).unwrap(), SNAPSHOT_COMPANY);
    }
}
