//! Configuration for the twemproxy metrics check.
//!
//! Values come from built-in defaults, then `TWEMPROXY_*` environment
//! variables (a `.env` file is honoured by the binary), then command-line
//! flags.

mod hostname;

pub use hostname::local_hostname;

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 22222;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default metric prefix: `<local hostname>.twemproxy`
pub fn default_scheme() -> String {
    format!("{}.twemproxy", local_hostname())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    pub host: String,
    pub port: u16,
    pub scheme: String,
    pub timeout_secs: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scheme: default_scheme(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EmitterConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("TWEMPROXY_HOST").unwrap_or(defaults.host);

        let port = match env::var("TWEMPROXY_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid TWEMPROXY_PORT: {}", raw))?,
            Err(_) => defaults.port,
        };

        let scheme = env::var("TWEMPROXY_SCHEME").unwrap_or(defaults.scheme);

        let timeout_secs = match env::var("TWEMPROXY_TIMEOUT") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid TWEMPROXY_TIMEOUT: {}", raw))?,
            Err(_) => defaults.timeout_secs,
        };

        let config = Self {
            host,
            port,
            scheme,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("Stats host must not be empty");
        }
        Ok(())
    }

    /// Overall deadline; zero means the run is not bounded
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
