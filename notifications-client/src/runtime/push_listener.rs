use super::{session_context::SessionContext, RuntimeConfig};
use crate::{dto::Notification, error::Error, push::PushSubscriber};
use std::sync::Arc;
use tokio::{sync::broadcast, time::sleep};
use tokio_util::sync::CancellationToken;

///
/// Keeps the session subscribed to its push channel
/// and reconciles the cache on every event
///
pub struct PushListener {
    context: SessionContext,
    subscriber: Arc<dyn PushSubscriber>,
    alerts_tx: broadcast::Sender<Notification>,
    config: RuntimeConfig,
}

impl PushListener {
    pub fn new(
        context: SessionContext,
        subscriber: Arc<dyn PushSubscriber>,
        alerts_tx: broadcast::Sender<Notification>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            context,
            subscriber,
            alerts_tx,
            config,
        }
    }

    #[tracing::instrument(
        name = "Push listener",
        skip_all,
        fields(user_id = %self.context.session.user_id)
    )]
    pub async fn run(self, cancel: CancellationToken) {
        let mut delay = self.config.reconnect_initial_delay;

        loop {
            let subscription = tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                subscription = self.subscriber.subscribe(&self.context.session) => subscription,
            };

            match subscription {
                Ok(mut subscription) => {
                    tracing::info!("listening for notifications");
                    delay = self.config.reconnect_initial_delay;

                    loop {
                        let notification = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => return,
                            notification = subscription.recv() => notification,
                        };
                        let Some(notification) = notification else {
                            break;
                        };

                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => return,
                            _ = self.process_notification(notification) => {}
                        }
                    }

                    tracing::warn!("subscription closed");
                }
                Err(Error::ChannelAuthorizationRefused) => {
                    tracing::info!("push disabled by service, relying on polling");
                    return;
                }
                Err(err) => tracing::warn!(%err, "failed to subscribe"),
            }

            tracing::debug!(delay_ms = delay.as_millis() as u64, "resubscribing");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                _ = sleep(delay) => {}
            }
            delay = (delay * 2).min(self.config.reconnect_max_delay);
        }
    }

    async fn process_notification(&self, notification: Notification) {
        tracing::debug!(id = %notification.id, "processing notification");

        self.context.invalidate().await;

        if self.alerts_tx.send(notification).is_err() {
            tracing::trace!("no alert receivers");
        }
    }
}
