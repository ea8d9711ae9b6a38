use crate::{
    context::RequestContext,
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelAuthorizationService: Send + Sync {
    ///
    /// Authorizes push socket of the session user to subscribe to a channel.
    /// Only the private channel of the session user can be authorized.
    ///
    /// ### Returns
    /// Authorization payload of the transport, None when push is disabled
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - socket id or channel name is malformed
    /// - [Error::Forbidden] when
    ///     - channel is not a private user channel
    ///     - channel belongs to another user
    ///
    async fn authorize(
        &self,
        ctx: &RequestContext,
        channel_auth: input::ChannelAuth,
    ) -> Result<Option<output::ChannelAuthorization>, Error>;
}
