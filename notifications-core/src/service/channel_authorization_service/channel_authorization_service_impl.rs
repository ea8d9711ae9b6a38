use super::ChannelAuthorizationService;
use crate::{
    context::RequestContext,
    dto::{input, output},
    error::Error,
    service::push_service::{channels, PushTransport},
};
use axum::async_trait;
use std::sync::Arc;

pub struct ChannelAuthorizationServiceImpl {
    transport: Arc<dyn PushTransport>,
}

impl ChannelAuthorizationServiceImpl {
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self { transport }
    }

    ///
    /// Socket ids are assigned by the push server as `<digits>.<digits>`
    ///
    fn is_valid_socket_id(socket_id: &str) -> bool {
        let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        match socket_id.split_once('.') {
            Some((left, right)) => is_number(left) && is_number(right),
            None => false,
        }
    }
}

#[async_trait]
impl ChannelAuthorizationService for ChannelAuthorizationServiceImpl {
    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn authorize(
        &self,
        ctx: &RequestContext,
        channel_auth: input::ChannelAuth,
    ) -> Result<Option<output::ChannelAuthorization>, Error> {
        tracing::info!(channel = %channel_auth.channel_name, "authorizing channel");

        if !Self::is_valid_socket_id(&channel_auth.socket_id) {
            return Err(Error::Validation {
                field: "socket_id",
                reason: "malformed socket id",
            });
        }
        if channel_auth.channel_name.is_empty() {
            return Err(Error::Validation {
                field: "channel_name",
                reason: "must not be empty",
            });
        }

        let owner = channels::private_user_channel_owner(&channel_auth.channel_name)
            .ok_or(Error::Forbidden("Invalid channel"))?;
        if owner != ctx.user.id.to_string() {
            return Err(Error::Forbidden("Forbidden"));
        }

        let authorization = self
            .transport
            .authorize_channel(&channel_auth.socket_id, &channel_auth.channel_name);
        tracing::info!(push_enabled = authorization.is_some(), "authorized channel");

        Ok(authorization)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{auth::User, service::push_service::MockPushTransport};
    use uuid::Uuid;

    fn context(user_id: Uuid) -> RequestContext {
        RequestContext::new("test-request", User::new(user_id, vec![]))
    }

    fn channel_auth(socket_id: &str, channel_name: String) -> input::ChannelAuth {
        input::ChannelAuth {
            socket_id: socket_id.to_string(),
            channel_name,
        }
    }

    #[tokio::test]
    async fn authorize_own_channel_delegates_to_transport() {
        let user_id = Uuid::new_v4();
        let expected_channel = format!("private-user-{user_id}");
        let mut transport = MockPushTransport::new();
        transport
            .expect_authorize_channel()
            .times(1)
            .returning(move |socket_id, channel| {
                assert_eq!(socket_id, "1234.5678");
                assert_eq!(channel, expected_channel);
                Some(output::ChannelAuthorization {
                    auth: "key:signature".to_string(),
                })
            });
        let service = ChannelAuthorizationServiceImpl::new(Arc::new(transport));

        let authorization = service
            .authorize(
                &context(user_id),
                channel_auth("1234.5678", format!("private-user-{user_id}")),
            )
            .await
            .unwrap();

        assert_eq!(
            authorization,
            Some(output::ChannelAuthorization {
                auth: "key:signature".to_string()
            })
        );
    }

    #[tokio::test]
    async fn authorize_push_disabled_returns_none() {
        let user_id = Uuid::new_v4();
        let mut transport = MockPushTransport::new();
        transport.expect_authorize_channel().returning(|_, _| None);
        let service = ChannelAuthorizationServiceImpl::new(Arc::new(transport));

        let authorization = service
            .authorize(
                &context(user_id),
                channel_auth("1.2", format!("private-user-{user_id}")),
            )
            .await
            .unwrap();

        assert!(authorization.is_none());
    }

    #[tokio::test]
    async fn authorize_not_private_user_channel() {
        let mut transport = MockPushTransport::new();
        transport.expect_authorize_channel().never();
        let service = ChannelAuthorizationServiceImpl::new(Arc::new(transport));

        let result = service
            .authorize(
                &context(Uuid::new_v4()),
                channel_auth("1.2", "presence-lobby".to_string()),
            )
            .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn authorize_channel_of_other_user() {
        let mut transport = MockPushTransport::new();
        transport.expect_authorize_channel().never();
        let service = ChannelAuthorizationServiceImpl::new(Arc::new(transport));

        let result = service
            .authorize(
                &context(Uuid::new_v4()),
                channel_auth("1.2", format!("private-user-{}", Uuid::new_v4())),
            )
            .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn authorize_malformed_socket_id() {
        let user_id = Uuid::new_v4();
        for socket_id in ["", "1234", "12.ab", ".5", "1.2.3"] {
            let mut transport = MockPushTransport::new();
            transport.expect_authorize_channel().never();
            let service = ChannelAuthorizationServiceImpl::new(Arc::new(transport));

            let result = service
                .authorize(
                    &context(user_id),
                    channel_auth(socket_id, format!("private-user-{user_id}")),
                )
                .await;

            assert!(
                matches!(
                    result,
                    Err(Error::Validation {
                        field: "socket_id",
                        ..
                    })
                ),
                "socket id {socket_id:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn authorize_empty_channel_name() {
        let service = ChannelAuthorizationServiceImpl::new(Arc::new(MockPushTransport::new()));

        let result = service
            .authorize(&context(Uuid::new_v4()), channel_auth("1.2", String::new()))
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation {
                field: "channel_name",
                ..
            })
        ));
    }
}
