use super::{
    dto::{FindOptions, NewNotification, Notification},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    ///
    /// Inserts new notification.
    ///
    /// ### Returns
    /// Stored notification with assigned id.
    /// `updated_at` is equal to `created_at` and `read_at` is empty.
    ///
    async fn insert(&self, notification: NewNotification) -> Result<Notification, Error>;

    ///
    /// Finds notifications that belong to the user.
    /// Notifications are sorted descending by creation date.
    ///
    /// Returns at most `options.limit + 1` notifications, so the caller
    /// can tell whether another page exists without counting.
    ///
    /// Cursor that does not point to any notification is ignored
    /// and the first page is returned.
    ///
    async fn find_many_by_user(
        &self,
        user_id: Uuid,
        options: FindOptions,
    ) -> Result<Vec<Notification>, Error>;

    ///
    /// Counts notifications of the user that were not read yet.
    ///
    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error>;

    async fn find(&self, id: ObjectId) -> Result<Option<Notification>, Error>;

    ///
    /// Sets read_at of unread notification.
    /// Already read notification is returned unchanged.
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - notification does not exist
    ///
    async fn update_read_at(
        &self,
        id: ObjectId,
        read_at: OffsetDateTime,
    ) -> Result<Notification, Error>;

    ///
    /// Sets read_at of every unread notification of the user.
    ///
    /// ### Returns
    /// Number of updated notifications
    ///
    async fn update_many_read_at(
        &self,
        user_id: Uuid,
        read_at: OffsetDateTime,
    ) -> Result<u64, Error>;

    ///
    /// Removes notification permanently
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - notification does not exist
    ///
    async fn delete(&self, id: ObjectId) -> Result<(), Error>;
}
