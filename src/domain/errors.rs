use thiserror::Error;

/// Errors raised while fetching the raw stats document from the proxy
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Can't connect to {addr}")]
    ConnectionRefused { addr: String },

    #[error("I/O error talking to {addr}: {source}")]
    Io {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Classifies an I/O error from the stats endpoint, singling out refused connections
    pub fn from_io(addr: &str, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::ConnectionRefused => FetchError::ConnectionRefused {
                addr: addr.to_string(),
            },
            _ => FetchError::Io {
                addr: addr.to_string(),
                source,
            },
        }
    }
}

/// Errors related to the shape of a stats snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid stats JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Stats snapshot must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("Unsupported {kind} value at '{path}'")]
    UnsupportedValue { path: String, kind: &'static str },
}

/// Everything that can stop a single fetch-and-emit cycle
#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("Connection timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
