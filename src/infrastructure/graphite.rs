//! Graphite plaintext output.
//!
//! One `<name> <value> <timestamp>` line per metric, all lines of a run
//! sharing the same timestamp.

use crate::domain::metric::Metric;
use std::io::{self, Write};

pub struct GraphiteWriter<W: Write> {
    out: W,
}

impl<W: Write> GraphiteWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes all metrics stamped with `timestamp` and flushes
    pub fn write_all(&mut self, metrics: &[Metric], timestamp: i64) -> io::Result<()> {
        for metric in metrics {
            writeln!(self.out, "{}", metric.to_line(timestamp))?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::MetricValue;

    #[test]
    fn test_writes_one_line_per_metric() {
        let metrics = vec![
            Metric::new("h.tp.a", MetricValue::Number(1u64.into())),
            Metric::new("h.tp.b", MetricValue::Number(2u64.into())),
        ];

        let mut buf = Vec::new();
        let mut writer = GraphiteWriter::new(&mut buf);
        writer.write_all(&metrics, 1700000000).unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output, "h.tp.a 1 1700000000\nh.tp.b 2 1700000000\n");
    }

    #[test]
    fn test_no_metrics_writes_nothing() {
        let mut buf = Vec::new();
        let mut writer = GraphiteWriter::new(&mut buf);
        writer.write_all(&[], 1700000000).unwrap();
        assert!(buf.is_empty());
    }
}
