use crate::{
    dto::{Notification, Session},
    error::Error,
};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushSubscriber: Send + Sync {
    ///
    /// Subscribes to the private channel of the session user.
    ///
    /// ### Errors
    /// - [Error::ChannelAuthorizationRefused] when service has push disabled
    /// - [Error::WebSocket] or [Error::Protocol] when push server misbehaves
    ///
    async fn subscribe(&self, session: &Session) -> Result<Subscription, Error>;

    fn is_enabled(&self) -> bool {
        true
    }
}

///
/// Live subscription to notification events.
/// Dropping it unsubscribes and closes the connection.
///
pub struct Subscription {
    events: mpsc::Receiver<Notification>,
    cancel: CancellationToken,
}

impl Subscription {
    pub fn new(events: mpsc::Receiver<Notification>, cancel: CancellationToken) -> Self {
        Self { events, cancel }
    }

    ///
    /// Waits for the next event.
    ///
    /// ### Returns
    /// None when connection was closed
    ///
    pub async fn recv(&mut self) -> Option<Notification> {
        self.events.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
