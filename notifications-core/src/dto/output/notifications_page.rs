use super::Notification;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsPage {
    pub data: Vec<Notification>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub unread_count: u64,
}
