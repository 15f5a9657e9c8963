use serde_json::Number;
use std::fmt;

/// Value of a flattened metric
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(Number),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// A single dotted metric name and its value, ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: MetricValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Graphite plaintext line: `<name> <value> <timestamp>`
    pub fn to_line(&self, timestamp: i64) -> String {
        format!("{} {} {}", self.name, self.value, timestamp)
    }
}
