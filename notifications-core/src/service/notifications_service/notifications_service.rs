use crate::{
    context::RequestContext,
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    ///
    /// Finds page of notifications that belong to the session user,
    /// newest first.
    ///
    /// ### Returns
    /// Page with cursor of the next page and current unread count
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - limit is outside of the allowed range
    ///     - cursor is not a notification id
    ///
    async fn get_notifications(
        &self,
        ctx: &RequestContext,
        query: input::NotificationsQuery,
    ) -> Result<output::NotificationsPage, Error>;

    async fn get_unread_count(&self, ctx: &RequestContext) -> Result<output::UnreadCount, Error>;

    ///
    /// Marks notification as read.
    /// Notification that was already read keeps its first read date.
    ///
    /// ### Returns
    /// Updated notification
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - notification id is malformed
    /// - [Error::NotificationNotExist] when
    ///     - notification with id does not exist
    /// - [Error::NotificationNotOwned] when
    ///     - notification belongs to another user
    ///
    async fn mark_as_read(
        &self,
        ctx: &RequestContext,
        mark_read: input::MarkRead,
    ) -> Result<output::Notification, Error>;

    ///
    /// Marks every unread notification of the session user as read
    ///
    async fn mark_all_as_read(&self, ctx: &RequestContext) -> Result<output::Success, Error>;

    ///
    /// Saves new notification without publishing it.
    ///
    /// ### Returns
    /// Created notification
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - title or message is empty or too long
    ///     - link is not an absolute URL
    ///
    async fn create_notification(
        &self,
        ctx: &RequestContext,
        notification: input::NewNotification,
    ) -> Result<output::Notification, Error>;

    ///
    /// Saves new notification and publishes it to the recipient.
    /// Failed publish is logged and does not affect the result.
    ///
    /// ### Errors
    /// - same as [NotificationsService::create_notification]
    ///
    async fn create_notification_with_push(
        &self,
        ctx: &RequestContext,
        notification: input::NewNotification,
    ) -> Result<output::Notification, Error>;

    ///
    /// Removes notification permanently
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - notification id is malformed
    /// - [Error::NotificationNotExist] when
    ///     - notification with id does not exist
    ///
    async fn delete_notification(&self, ctx: &RequestContext, id: String) -> Result<(), Error>;
}
