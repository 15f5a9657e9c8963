//! Command-line interface for the check.

use clap::{ArgAction, Parser};

use crate::config::EmitterConfig;

/// CLI arguments. Every flag is optional and overrides the environment.
#[derive(Parser, Debug, Default)]
#[command(
    name = "twemproxy-metrics",
    version,
    about = "Emit twemproxy stats as Graphite metrics",
    disable_help_flag = true
)]
pub struct Args {
    /// Twemproxy stats host to connect to
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Twemproxy stats port to connect to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Metric naming scheme, text to prepend to metric
    #[arg(short, long)]
    pub scheme: Option<String>,

    /// Timeout in seconds to complete the operation
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Applies the flags that were given on top of `config`
    pub fn apply(&self, mut config: EmitterConfig) -> anyhow::Result<EmitterConfig> {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(scheme) = &self.scheme {
            config.scheme = scheme.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config.validate()?;
        Ok(config)
    }
}
