use super::{Error, PushTransport};
use crate::dto::output;
use axum::async_trait;
use serde_json::Value;

///
/// Transport used when realtime push is turned off.
/// Every event is dropped and no channel is authorized.
///
#[derive(Default)]
pub struct DisabledPushTransport;

#[async_trait]
impl PushTransport for DisabledPushTransport {
    async fn trigger(&self, channel: &str, event: &str, _payload: &Value) -> Result<(), Error> {
        tracing::trace!(channel, event, "push disabled, event dropped");

        Ok(())
    }

    fn authorize_channel(
        &self,
        _socket_id: &str,
        _channel: &str,
    ) -> Option<output::ChannelAuthorization> {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn trigger_succeeds() {
        let transport = DisabledPushTransport;

        let result = transport
            .trigger("private-user-1", "notification", &json!({}))
            .await;

        assert!(result.is_ok());
    }

    #[test]
    fn authorize_channel_none() {
        let transport = DisabledPushTransport;

        assert!(transport
            .authorize_channel("1234.1234", "private-user-1")
            .is_none());
    }
}
