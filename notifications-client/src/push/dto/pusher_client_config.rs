use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PusherClientConfig {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    /// Public application key
    pub key: String,
    /// Max time from connecting to confirmed subscription
    pub handshake_timeout: Duration,
    /// Events buffered before new ones are dropped
    pub event_buffer: usize,
}
