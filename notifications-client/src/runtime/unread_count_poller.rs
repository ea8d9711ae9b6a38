use super::session_context::SessionContext;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub struct UnreadCountPoller {
    context: SessionContext,
    interval: Interval,
}

impl UnreadCountPoller {
    pub fn new(context: SessionContext, period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { context, interval }
    }

    #[tracing::instrument(
        name = "Unread count poller",
        skip_all,
        fields(user_id = %self.context.session.user_id)
    )]
    pub async fn run(mut self, cancel: CancellationToken) {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {},

            _ = async { loop {
                self.interval.tick().await;

                match self.context.refresh_unread_count().await {
                    Ok(count) => tracing::debug!(count, "refreshed unread count"),
                    Err(err) => {
                        tracing::warn!(%err, "failed to refresh unread count, keeping cached")
                    }
                }
            }} => {}
        }
    }
}
