//! One bounded fetch-and-emit cycle.
//!
//! Connect, read, parse and flatten share a single deadline. Nothing is
//! written until the whole snapshot has been flattened.

use crate::config::EmitterConfig;
use crate::domain::errors::EmitterError;
use crate::domain::flatten::flatten;
use crate::domain::metric::Metric;
use crate::domain::outcome::CheckOutcome;
use crate::domain::ports::StatsSource;
use crate::domain::snapshot::StatsSnapshot;
use crate::infrastructure::{GraphiteWriter, TcpStatsClient};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct MetricEmitter {
    source: Arc<dyn StatsSource>,
    scheme: String,
    timeout: Duration,
}

impl MetricEmitter {
    pub fn new(source: Arc<dyn StatsSource>, scheme: impl Into<String>, timeout: Duration) -> Self {
        Self {
            source,
            scheme: scheme.into(),
            timeout,
        }
    }

    /// Emitter reading from the TCP stats port named in the config
    pub fn from_config(config: &EmitterConfig) -> Self {
        let client = TcpStatsClient::new(config.host.clone(), config.port);
        Self::new(Arc::new(client), config.scheme.clone(), config.timeout())
    }

    /// Fetches and flattens one snapshot within the deadline.
    ///
    /// A zero timeout runs without a deadline.
    pub async fn collect(&self) -> Result<Vec<Metric>, EmitterError> {
        let work = async {
            let body = self.source.fetch().await?;
            let snapshot = StatsSnapshot::parse(&body)?;
            let metrics = flatten(&snapshot, &self.scheme)?;
            Ok::<_, EmitterError>(metrics)
        };

        if self.timeout.is_zero() {
            return work.await;
        }

        tokio::time::timeout(self.timeout, work)
            .await
            .map_err(|_| EmitterError::Timeout {
                secs: self.timeout.as_secs(),
            })?
    }

    /// Runs a full cycle, writing metrics to `out` on success
    pub async fn run<W: Write>(&self, out: &mut GraphiteWriter<W>) -> CheckOutcome {
        debug!(
            "Fetching stats from {} (timeout {:?})",
            self.source.endpoint(),
            self.timeout
        );

        let metrics = match self.collect().await {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!("Stats collection from {} failed: {}", self.source.endpoint(), e);
                return CheckOutcome::from(&e);
            }
        };

        let timestamp = chrono::Utc::now().timestamp();
        if let Err(e) = out.write_all(&metrics, timestamp) {
            warn!("Failed to write metrics: {}", e);
            return CheckOutcome::unknown(format!("Check failed to run: {}", e));
        }

        info!("Emitted {} metrics from {}", metrics.len(), self.source.endpoint());
        CheckOutcome::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::FetchError;
    use crate::domain::outcome::CheckStatus;
    use async_trait::async_trait;

    enum Reply {
        Body(&'static str),
        Delayed(Duration, &'static str),
        Refused,
        Hang,
    }

    struct MockSource {
        reply: Reply,
    }

    #[async_trait]
    impl StatsSource for MockSource {
        async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
            match self.reply {
                Reply::Body(body) => Ok(body.as_bytes().to_vec()),
                Reply::Delayed(delay, body) => {
                    tokio::time::sleep(delay).await;
                    Ok(body.as_bytes().to_vec())
                }
                Reply::Refused => Err(FetchError::ConnectionRefused {
                    addr: "127.0.0.1:22222".to_string(),
                }),
                Reply::Hang => std::future::pending().await,
            }
        }

        fn endpoint(&self) -> String {
            "mock".to_string()
        }
    }

    fn emitter(reply: Reply, timeout: Duration) -> MetricEmitter {
        MetricEmitter::new(Arc::new(MockSource { reply }), "h.tp", timeout)
    }

    #[tokio::test]
    async fn test_success_writes_stamped_lines() {
        let emitter = emitter(
            Reply::Body(r#"{"service":"x","pool1":{"a":1,"b":2}}"#),
            Duration::from_secs(5),
        );
        let mut buf = Vec::new();
        let mut writer = GraphiteWriter::new(&mut buf);

        let outcome = emitter.run(&mut writer).await;
        assert!(outcome.is_ok());

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("h.tp.a 1 "));
        assert!(lines[1].starts_with("h.tp.b 2 "));

        let ts0 = lines[0].rsplit(' ').next().unwrap();
        let ts1 = lines[1].rsplit(' ').next().unwrap();
        assert_eq!(ts0, ts1);
        assert!(ts0.parse::<i64>().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_refused_is_warning_without_output() {
        let emitter = emitter(Reply::Refused, Duration::from_secs(5));
        let mut buf = Vec::new();
        let mut writer = GraphiteWriter::new(&mut buf);

        let outcome = emitter.run(&mut writer).await;
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.message.as_deref(), Some("Can't connect to 127.0.0.1:22222"));
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_hang_times_out() {
        let emitter = emitter(Reply::Hang, Duration::from_millis(100));

        let err = emitter.collect().await.unwrap_err();
        assert!(matches!(err, EmitterError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_zero_timeout_waits_for_slow_source() {
        let emitter = emitter(
            Reply::Delayed(Duration::from_millis(50), r#"{"pool2":7}"#),
            Duration::ZERO,
        );

        let metrics = emitter.collect().await.unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "h.tp.pool2");
    }

    #[tokio::test]
    async fn test_malformed_json_is_unknown_without_output() {
        let emitter = emitter(Reply::Body("{not json"), Duration::from_secs(5));
        let mut buf = Vec::new();
        let mut writer = GraphiteWriter::new(&mut buf);

        let outcome = emitter.run(&mut writer).await;
        assert_eq!(outcome.status, CheckStatus::Unknown);
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_shape_emits_nothing() {
        let emitter = emitter(
            Reply::Body(r#"{"pool1":{"a":1},"pool2":[1,2]}"#),
            Duration::from_secs(5),
        );
        let mut buf = Vec::new();
        let mut writer = GraphiteWriter::new(&mut buf);

        let outcome = emitter.run(&mut writer).await;
        assert_eq!(outcome.status, CheckStatus::Unknown);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_config_uses_scheme() {
        let config = EmitterConfig {
            host: "127.0.0.1".to_string(),
            port: 22222,
            scheme: "cache01.twemproxy".to_string(),
            timeout_secs: 3,
        };
        let emitter = MetricEmitter::from_config(&config);
        assert_eq!(emitter.scheme, "cache01.twemproxy");
        assert_eq!(emitter.timeout, Duration::from_secs(3));
        assert_eq!(emitter.source.endpoint(), "127.0.0.1:22222");
    }
}
