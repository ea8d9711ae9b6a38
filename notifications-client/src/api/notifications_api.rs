use crate::{
    dto::{ChannelAuthorization, Notification, NotificationsPage, PageRequest, Session},
    error::Error,
};
use async_trait::async_trait;

///
/// Remote notifications service
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    ///
    /// Fetches one page of session user notifications, newest first.
    ///
    /// ### Errors
    /// - [Error::Request] when service is unreachable
    /// - [Error::Status] when request was rejected
    ///
    async fn get_notifications(
        &self,
        session: &Session,
        request: PageRequest,
    ) -> Result<NotificationsPage, Error>;

    async fn get_unread_count(&self, session: &Session) -> Result<u64, Error>;

    ///
    /// Marks notification as read.
    /// Marking already read notification returns it unchanged.
    ///
    async fn mark_read(&self, session: &Session, notification_id: &str)
        -> Result<Notification, Error>;

    async fn mark_all_read(&self, session: &Session) -> Result<(), Error>;

    ///
    /// Asks the service to sign subscription of the socket to the channel.
    ///
    /// ### Returns
    /// None when push is disabled on the service
    ///
    /// ### Errors
    /// - [Error::Status] with 403 when channel belongs to another user
    ///
    async fn authorize_channel(
        &self,
        session: &Session,
        socket_id: &str,
        channel_name: &str,
    ) -> Result<Option<ChannelAuthorization>, Error>;
}
