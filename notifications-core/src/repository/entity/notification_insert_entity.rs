use bson::{DateTime, Uuid};
use serde::Serialize;

#[derive(Serialize)]
pub struct NotificationInsertEntity {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
