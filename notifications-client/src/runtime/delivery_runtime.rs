use super::{
    push_listener::PushListener, session_context::SessionContext,
    unread_count_poller::UnreadCountPoller, InfiniteScroll, NotificationsCache, RuntimeConfig,
};
use crate::{
    api::NotificationsApi,
    dto::{Notification, Session},
    error::Error,
    push::PushSubscriber,
};
use std::sync::Arc;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

struct ActiveSession {
    context: SessionContext,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

///
/// Keeps notifications of the signed in user up to date.
///
/// While authenticated it polls the unread count and listens on the user
/// push channel. Push events invalidate cached data and are re-published
/// as alerts. The service stays the source of truth for every value.
///
pub struct DeliveryRuntime {
    config: RuntimeConfig,
    api: Arc<dyn NotificationsApi>,
    subscriber: Arc<dyn PushSubscriber>,
    cache: Arc<NotificationsCache>,
    alerts_tx: broadcast::Sender<Notification>,
    active: Mutex<Option<ActiveSession>>,
}

impl DeliveryRuntime {
    pub fn new(
        config: RuntimeConfig,
        api: Arc<dyn NotificationsApi>,
        subscriber: Arc<dyn PushSubscriber>,
    ) -> Self {
        let (alerts_tx, _) = broadcast::channel(config.alert_buffer);

        Self {
            config,
            api,
            subscriber,
            cache: Arc::new(NotificationsCache::new()),
            alerts_tx,
            active: Mutex::new(None),
        }
    }

    ///
    /// Starts background work for the session.
    /// Previous session is torn down first.
    ///
    #[tracing::instrument(skip_all, fields(user_id = %session.user_id))]
    pub async fn authenticate(&self, session: Session) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            Self::tear_down(&self.cache, previous).await;
        }

        let generation = self.cache.start_session().await;
        let context = SessionContext {
            api: self.api.clone(),
            cache: self.cache.clone(),
            session,
            generation,
        };
        let cancel = CancellationToken::new();
        let mut tasks = Vec::new();

        let poller = UnreadCountPoller::new(context.clone(), self.config.unread_count_interval);
        tasks.push(tokio::spawn(poller.run(cancel.clone())));

        if self.subscriber.is_enabled() {
            let listener = PushListener::new(
                context.clone(),
                self.subscriber.clone(),
                self.alerts_tx.clone(),
                self.config.clone(),
            );
            tasks.push(tokio::spawn(listener.run(cancel.clone())));
        } else {
            tracing::info!("push disabled, relying on polling");
        }

        tracing::info!(generation, "session started");
        *active = Some(ActiveSession {
            context,
            cancel,
            tasks,
        });
    }

    ///
    /// Stops background work, unsubscribes and clears cached data.
    /// Responses still in flight are discarded.
    ///
    pub async fn deauthenticate(&self) {
        let mut active = self.active.lock().await;

        match active.take() {
            Some(previous) => Self::tear_down(&self.cache, previous).await,
            None => tracing::debug!("no session to end"),
        }
    }

    async fn tear_down(cache: &NotificationsCache, active: ActiveSession) {
        let user_id = active.context.session.user_id;
        active.cancel.cancel();
        cache.end_session().await;

        for task in active.tasks {
            if let Err(err) = task.await {
                tracing::warn!(%err, "session task failed");
            }
        }
        tracing::info!(%user_id, "session ended");
    }

    ///
    /// Receiver of notifications delivered by push
    ///
    pub fn alerts(&self) -> broadcast::Receiver<Notification> {
        self.alerts_tx.subscribe()
    }

    ///
    /// Last unread count received from the service.
    /// None until fetched and right after invalidation.
    ///
    pub async fn unread_count(&self) -> Option<u64> {
        self.cache.unread_count().await
    }

    pub async fn refresh_unread_count(&self) -> Result<u64, Error> {
        self.context().await?.refresh_unread_count().await
    }

    pub async fn notifications(&self, unread_only: bool) -> Result<InfiniteScroll, Error> {
        let context = self.context().await?;
        let epoch = self
            .cache
            .pages_epoch(context.generation)
            .await
            .ok_or(Error::Unauthenticated)?;

        Ok(InfiniteScroll::new(
            context,
            self.config.page_limit,
            unread_only,
            epoch,
        ))
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<Notification, Error> {
        let context = self.context().await?;

        let notification = context
            .api
            .mark_read(&context.session, notification_id)
            .await?;
        context.invalidate().await;

        Ok(notification)
    }

    pub async fn mark_all_read(&self) -> Result<(), Error> {
        let context = self.context().await?;

        context.api.mark_all_read(&context.session).await?;
        context.invalidate().await;

        Ok(())
    }

    async fn context(&self) -> Result<SessionContext, Error> {
        self.active
            .lock()
            .await
            .as_ref()
            .map(|active| active.context.clone())
            .ok_or(Error::Unauthenticated)
    }
}

impl Drop for DeliveryRuntime {
    fn drop(&mut self) {
        if let Some(active) = self.active.get_mut() {
            active.cancel.cancel();
        }
    }
}
