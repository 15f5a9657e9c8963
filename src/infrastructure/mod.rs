pub mod graphite;
pub mod stats_client;

pub use graphite::GraphiteWriter;
pub use stats_client::TcpStatsClient;
