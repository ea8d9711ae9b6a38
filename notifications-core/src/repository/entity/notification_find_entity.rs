use crate::repository::dto::Notification;
use bson::{oid::ObjectId, DateTime, Uuid};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct NotificationFindEntity {
    pub _id: ObjectId,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Deserialize)]
pub struct NotificationCreatedAtFindEntity {
    pub created_at: DateTime,
}

impl From<NotificationFindEntity> for Notification {
    fn from(entity: NotificationFindEntity) -> Self {
        Self {
            id: entity._id,
            user_id: entity.user_id.into(),
            title: entity.title,
            message: entity.message,
            link: entity.link,
            read_at: entity.read_at.map(DateTime::to_time_0_3),
            created_at: entity.created_at.to_time_0_3(),
            updated_at: entity.updated_at.to_time_0_3(),
        }
    }
}
