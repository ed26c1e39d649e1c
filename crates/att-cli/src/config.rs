//! Configuration loading and management.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use att_core::view::DEFAULT_PAGE_SIZE;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the attendance backend, e.g. `https://api.example.com/v1`.
    pub base_url: Option<String>,
    /// Company whose records are reported.
    pub company_id: Option<String>,
    /// Bearer token for the backend.
    pub api_token: Option<String>,
    /// Rows per report page.
    pub page_size: NonZeroUsize,
    /// Restricts every report to this device when set.
    pub assigned_device: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("company_id", &self.company_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("page_size", &self.page_size)
            .field("assigned_device", &self.assigned_device)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            company_id: None,
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            assigned_device: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default location, then `config_path`
    /// if given, then `ATT_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ATT_*)
        figment = figment.merge(Env::prefixed("ATT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for att.
///
/// On Linux: `~/.config/att`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("att"))
}
