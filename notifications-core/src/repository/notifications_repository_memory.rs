use super::{
    dto::{FindOptions, NewNotification, Notification},
    Error, NotificationsRepository,
};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

///
/// Repository keeping notifications in process memory.
///
/// Used when running without a database (tests, local development).
/// Follows the same ordering and cursor rules as [super::NotificationsRepositoryImpl].
///
#[derive(Default)]
pub struct NotificationsRepositoryMemory {
    notifications: RwLock<Vec<Notification>>,
}

impl NotificationsRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryMemory {
    async fn insert(&self, notification: NewNotification) -> Result<Notification, Error> {
        let notification = Notification {
            id: ObjectId::new(),
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            link: notification.link,
            read_at: None,
            created_at: notification.created_at,
            updated_at: notification.created_at,
        };

        self.notifications.write().await.push(notification.clone());

        Ok(notification)
    }

    async fn find_many_by_user(
        &self,
        user_id: Uuid,
        FindOptions {
            cursor,
            limit,
            unread_only,
        }: FindOptions,
    ) -> Result<Vec<Notification>, Error> {
        let notifications = self.notifications.read().await;

        let cursor_created_at = cursor.and_then(|cursor| {
            notifications
                .iter()
                .find(|notification| notification.id == cursor && notification.user_id == user_id)
                .map(|notification| notification.created_at)
        });

        let mut found = notifications
            .iter()
            .filter(|notification| notification.user_id == user_id)
            .filter(|notification| !unread_only || notification.read_at.is_none())
            .filter(|notification| match cursor_created_at {
                Some(created_at) => notification.created_at < created_at,
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();

        found.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        found.truncate(limit as usize + 1);

        Ok(found)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error> {
        let count = self
            .notifications
            .read()
            .await
            .iter()
            .filter(|notification| notification.user_id == user_id)
            .filter(|notification| notification.read_at.is_none())
            .count();

        Ok(count as u64)
    }

    async fn find(&self, id: ObjectId) -> Result<Option<Notification>, Error> {
        let notification = self
            .notifications
            .read()
            .await
            .iter()
            .find(|notification| notification.id == id)
            .cloned();

        Ok(notification)
    }

    async fn update_read_at(
        &self,
        id: ObjectId,
        read_at: OffsetDateTime,
    ) -> Result<Notification, Error> {
        let mut notifications = self.notifications.write().await;

        let notification = notifications
            .iter_mut()
            .find(|notification| notification.id == id)
            .ok_or(Error::NoDocumentUpdated)?;

        if notification.read_at.is_none() {
            notification.read_at = Some(read_at);
            notification.updated_at = read_at;
        }

        Ok(notification.clone())
    }

    async fn update_many_read_at(
        &self,
        user_id: Uuid,
        read_at: OffsetDateTime,
    ) -> Result<u64, Error> {
        let mut notifications = self.notifications.write().await;

        let mut count = 0;
        notifications
            .iter_mut()
            .filter(|notification| notification.user_id == user_id)
            .filter(|notification| notification.read_at.is_none())
            .for_each(|notification| {
                notification.read_at = Some(read_at);
                notification.updated_at = read_at;
                count += 1;
            });

        Ok(count)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), Error> {
        let mut notifications = self.notifications.write().await;

        let len_before = notifications.len();
        notifications.retain(|notification| notification.id != id);

        match notifications.len() < len_before {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}
