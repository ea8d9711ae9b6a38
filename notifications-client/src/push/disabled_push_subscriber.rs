use super::{PushSubscriber, Subscription};
use crate::{dto::Session, error::Error};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

///
/// Subscriber used when push is turned off.
/// Notifications are discovered only by polling.
///
pub struct DisabledPushSubscriber;

#[async_trait]
impl PushSubscriber for DisabledPushSubscriber {
    async fn subscribe(&self, _session: &Session) -> Result<Subscription, Error> {
        let (_, events) = mpsc::channel(1);

        Ok(Subscription::new(events, CancellationToken::new()))
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
