use super::NotificationsCache;
use crate::{api::NotificationsApi, dto::Session, error::Error};
use std::sync::Arc;

///
/// Everything a background task needs to act on behalf of one session
///
#[derive(Clone)]
pub struct SessionContext {
    pub api: Arc<dyn NotificationsApi>,
    pub cache: Arc<NotificationsCache>,
    pub session: Session,
    pub generation: u64,
}

impl SessionContext {
    pub async fn refresh_unread_count(&self) -> Result<u64, Error> {
        let count = self.api.get_unread_count(&self.session).await?;

        if !self.cache.set_unread_count(self.generation, count).await {
            tracing::debug!("discarded unread count of ended session");
        }

        Ok(count)
    }

    ///
    /// Invalidates pages and unread count, then refetches unread count.
    /// Failed refetch keeps the count empty until the next poll.
    ///
    pub async fn invalidate(&self) {
        if !self.cache.invalidate(self.generation).await {
            return;
        }

        if let Err(err) = self.refresh_unread_count().await {
            tracing::warn!(%err, "failed to refresh unread count");
        }
    }
}
