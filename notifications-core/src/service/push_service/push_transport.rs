use super::Error;
use crate::dto::output;
use axum::async_trait;
use serde_json::Value;

///
/// Low level access to the realtime push server
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushTransport: Send + Sync {
    ///
    /// Publishes event on a channel.
    /// Nothing is retried or buffered.
    ///
    /// ### Errors
    /// - [Error::Request] when push server is unreachable
    /// - [Error::Status] when push server rejected the event
    ///
    async fn trigger(&self, channel: &str, event: &str, payload: &Value) -> Result<(), Error>;

    ///
    /// Signs subscription of the socket to the channel.
    /// Caller is responsible for checking the socket may access the channel.
    ///
    /// ### Returns
    /// None when push is disabled
    ///
    fn authorize_channel(&self, socket_id: &str, channel: &str)
        -> Option<output::ChannelAuthorization>;
}
