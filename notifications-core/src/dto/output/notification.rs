use crate::repository;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Notification as seen by clients.
/// The same shape is published as push event payload.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<repository::Notification> for Notification {
    fn from(notification: repository::Notification) -> Self {
        Self {
            id: notification.id.to_hex(),
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            link: notification.link,
            read_at: notification.read_at,
            created_at: notification.created_at,
            updated_at: notification.updated_at,
        }
    }
}
