use super::{
    channels::{self, NOTIFICATION_EVENT},
    Error, PushGateway, PushTransport,
};
use crate::dto::output;
use axum::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct PushGatewayImpl {
    transport: Arc<dyn PushTransport>,
}

impl PushGatewayImpl {
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl PushGateway for PushGatewayImpl {
    async fn publish(
        &self,
        user_id: Uuid,
        notification: output::Notification,
    ) -> Result<(), Error> {
        let channel = channels::private_user_channel(user_id);
        let payload = serde_json::to_value(&notification)?;

        self.transport
            .trigger(&channel, NOTIFICATION_EVENT, &payload)
            .await?;
        tracing::debug!(%channel, id = %notification.id, "published notification");

        Ok(())
    }
}
