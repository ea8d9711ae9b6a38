#[derive(Debug, Clone)]
pub struct NotificationsServiceConfig {
    /// Max number of characters in title
    pub max_title_len: usize,
    /// Max number of characters in message
    pub max_message_len: usize,
}

impl Default for NotificationsServiceConfig {
    fn default() -> Self {
        Self {
            max_title_len: 255,
            max_message_len: 1000,
        }
    }
}
