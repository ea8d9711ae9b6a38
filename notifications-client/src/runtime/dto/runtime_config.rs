use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub page_limit: u32,
    pub unread_count_interval: Duration,
    /// Alerts kept for slow receivers
    pub alert_buffer: usize,
    pub reconnect_initial_delay: Duration,
    pub reconnect_max_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            page_limit: 20,
            unread_count_interval: Duration::from_secs(30),
            alert_buffer: 16,
            reconnect_initial_delay: Duration::from_secs(1),
            reconnect_max_delay: Duration::from_secs(30),
        }
    }
}
