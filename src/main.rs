//! twemproxy-metrics - Graphite metric check for twemproxy
//!
//! Connects to the twemproxy stats port, flattens the JSON snapshot and
//! prints one `<name> <value> <timestamp>` line per counter on stdout.
//! Exits with Sensu status codes (0 ok, 1 warning, 3 unknown).
//!
//! # Usage
//! ```sh
//! twemproxy-metrics -h 127.0.0.1 -p 22222 -s "$(hostname).twemproxy" -t 5
//! ```
//!
//! # Environment Variables
//! - `TWEMPROXY_HOST`, `TWEMPROXY_PORT`, `TWEMPROXY_SCHEME`, `TWEMPROXY_TIMEOUT` - defaults for the flags
//! - `RUST_LOG` - diagnostics level on stderr (default: warn)

use std::io;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::prelude::*;
use twemproxy_metrics::application::MetricEmitter;
use twemproxy_metrics::config::EmitterConfig;
use twemproxy_metrics::domain::outcome::CheckOutcome;
use twemproxy_metrics::infrastructure::GraphiteWriter;
use twemproxy_metrics::interfaces::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // stdout carries metrics, diagnostics go to stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::default().add_directive(Level::WARN.into())
            }),
        )
        .with(stderr_layer)
        .init();

    let args = Args::parse_args();

    let outcome = match EmitterConfig::from_env().and_then(|config| args.apply(config)) {
        Ok(config) => {
            debug!("Configuration loaded: {:?}", config);
            let emitter = MetricEmitter::from_config(&config);
            let mut writer = GraphiteWriter::new(io::stdout().lock());
            emitter.run(&mut writer).await
        }
        Err(e) => CheckOutcome::unknown(format!("Check failed to run: {:#}", e)),
    };

    debug!("Check finished: {}", outcome.status);
    if let Some(line) = outcome.output_line() {
        println!("{}", line);
    }

    ExitCode::from(outcome.status.exit_code())
}
