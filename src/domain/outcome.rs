use crate::domain::errors::{EmitterError, FetchError};
use std::fmt;

/// Sensu check status, doubling as the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl CheckStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Critical => 2,
            CheckStatus::Unknown => 3,
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Critical => "CRITICAL",
            CheckStatus::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// How a run finished: a status and, unless it succeeded, a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub message: Option<String>,
}

impl CheckOutcome {
    pub fn ok() -> Self {
        Self {
            status: CheckStatus::Ok,
            message: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            message: Some(message.into()),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Unknown,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }

    /// Line printed alongside the metrics: the bare message, as Graphite metric checks report it
    pub fn output_line(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<&EmitterError> for CheckOutcome {
    fn from(err: &EmitterError) -> Self {
        match err {
            EmitterError::Timeout { .. } => CheckOutcome::warning("Connection timed out"),
            EmitterError::Fetch(refused @ FetchError::ConnectionRefused { .. }) => {
                CheckOutcome::warning(refused.to_string())
            }
            other => CheckOutcome::unknown(format!("Check failed to run: {}", other)),
        }
    }
}
