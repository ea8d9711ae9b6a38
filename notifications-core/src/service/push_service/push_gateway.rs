use super::Error;
use crate::dto::output;
use axum::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushGateway: Send + Sync {
    ///
    /// Publishes notification on the private channel of the user.
    /// Delivery is best effort: nothing is queued when it fails.
    ///
    /// ### Errors
    /// - any transport [Error]
    ///
    async fn publish(&self, user_id: Uuid, notification: output::Notification)
        -> Result<(), Error>;
}
