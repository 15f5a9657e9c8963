use crate::domain::errors::FetchError;
use crate::domain::ports::StatsSource;
use async_trait::async_trait;
use tokio::{io::AsyncReadExt, net::TcpStream};
use tracing::debug;

/// TCP client for the twemproxy stats port.
///
/// The proxy writes one JSON document per connection and closes it, so the
/// whole response is read until EOF. Nothing is sent upstream.
pub struct TcpStatsClient {
    host: String,
    port: u16,
}

impl TcpStatsClient {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[async_trait]
impl StatsSource for TcpStatsClient {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let address = self.address();

        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| FetchError::from_io(&address, e))?;
        debug!("Connected to stats endpoint {}", address);

        let mut body = Vec::new();
        stream
            .read_to_end(&mut body)
            .await
            .map_err(|e| FetchError::from_io(&address, e))?;
        debug!("Read {} bytes from {}", body.len(), address);

        Ok(body)
    }

    fn endpoint(&self) -> String {
        self.address()
    }
}
