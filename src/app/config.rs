//! Application configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `SHIFTRANK_*` environment variables, then command-line flags.

use crate::api::{Endpoints, DEFAULT_BASE_URL};
use crate::error::{ErrorCode, RankError, Result};
use crate::ranking::{RankingOptions, Strategy, DEFAULT_TOP_N};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Base URL of the upstream shifts API
    pub base_url: String,
    /// How many entities to keep in the ranking
    pub top_n: usize,
    /// Drop the leading record of every workplace shift page
    pub skip_leading_shift: bool,
    pub strategy: Strategy,
    pub request_timeout_secs: u64,
}

/// On-disk shape of the TOML config file; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub top_n: Option<usize>,
    pub skip_leading_shift: Option<bool>,
    pub strategy: Option<Strategy>,
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Create a new application configuration from defaults
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Build the configuration from defaults, an optional file and the environment
    pub async fn load(verbose: u8, path: Option<&Path>) -> Result<Self> {
        let mut config = Self::new(verbose);

        if let Some(path) = path {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                RankError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    format!("Could not read config file {}", path.display()),
                )
                .with_source(e)
            })?;
            config.merge_file(toml::from_str(&content)?);
        }

        config.merge_env_vars();
        Ok(config)
    }

    pub fn merge_file(&mut self, file: FileConfig) {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(top_n) = file.top_n {
            self.top_n = top_n;
        }
        if let Some(skip) = file.skip_leading_shift {
            self.skip_leading_shift = skip;
        }
        if let Some(strategy) = file.strategy {
            self.strategy = strategy;
        }
        if let Some(timeout) = file.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup; unparsable values are ignored
    pub fn merge_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup("SHIFTRANK_API_URL") {
            self.base_url = base_url;
        }

        if let Some(top_n) = lookup("SHIFTRANK_TOP_N") {
            match top_n.parse::<usize>() {
                Ok(value) => self.top_n = value,
                Err(_) => warn!("Ignoring SHIFTRANK_TOP_N={:?}: not a number", top_n),
            }
        }

        if let Some(skip) = lookup("SHIFTRANK_SKIP_LEADING_SHIFT") {
            match skip.parse::<bool>() {
                Ok(value) => self.skip_leading_shift = value,
                Err(_) => warn!(
                    "Ignoring SHIFTRANK_SKIP_LEADING_SHIFT={:?}: expected true or false",
                    skip
                ),
            }
        }

        if let Some(strategy) = lookup("SHIFTRANK_STRATEGY") {
            match strategy.parse::<Strategy>() {
                Ok(value) => self.strategy = value,
                Err(e) => warn!("Ignoring SHIFTRANK_STRATEGY: {}", e),
            }
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        if let Some(top_n) = top_n {
            self.top_n = top_n;
        }
        self
    }

    pub fn with_strategy(mut self, strategy: Option<Strategy>) -> Self {
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        self
    }

    /// `--no-skip-leading-shift` can only turn the skip off
    pub fn with_leading_shift_kept(mut self, keep: bool) -> Self {
        if keep {
            self.skip_leading_shift = false;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(RankError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "top_n must be at least 1",
            ));
        }
        self.endpoints().map(|_| ())
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::new(&self.base_url)
    }

    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            top_n: self.top_n,
            skip_leading_shift: self.skip_leading_shift,
            strategy: self.strategy,
        }
    }

    /// Per-request timeout for the HTTP client; `0` disables it
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace,hyper=debug,reqwest=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            base_url: DEFAULT_BASE_URL.to_string(),
            top_n: DEFAULT_TOP_N,
            skip_leading_shift: true,
            strategy: Strategy::PerEntity,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
