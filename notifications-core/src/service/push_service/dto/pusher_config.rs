use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PusherConfig {
    pub app_id: String,
    pub key: String,
    pub secret: String,
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    /// Timeout of a single HTTP request to the push server
    pub timeout: Duration,
}
