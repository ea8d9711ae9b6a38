use tokio::sync::Mutex;

#[derive(Default)]
struct CacheState {
    generation: u64,
    unread_count: Option<u64>,
    pages_epoch: u64,
}

///
/// Client side cache of the notifications of the current session.
///
/// Every write carries the generation of the session that issued it.
/// Writes of ended sessions are discarded, so late responses
/// never leak into the next session.
///
#[derive(Default)]
pub struct NotificationsCache {
    state: Mutex<CacheState>,
}

impl NotificationsCache {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Clears the cache for a new session.
    ///
    /// ### Returns
    /// Generation of the new session
    ///
    pub async fn start_session(&self) -> u64 {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.unread_count = None;
        state.pages_epoch = 0;

        state.generation
    }

    pub async fn end_session(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.unread_count = None;
        state.pages_epoch = 0;
    }

    pub async fn unread_count(&self) -> Option<u64> {
        self.state.lock().await.unread_count
    }

    ///
    /// ### Returns
    /// false when generation is stale and nothing was written
    ///
    pub async fn set_unread_count(&self, generation: u64, count: u64) -> bool {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            return false;
        }

        state.unread_count = Some(count);
        true
    }

    ///
    /// Drops cached unread count and marks every fetched page as stale.
    ///
    /// ### Returns
    /// false when generation is stale and nothing was invalidated
    ///
    pub async fn invalidate(&self, generation: u64) -> bool {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            return false;
        }

        state.unread_count = None;
        state.pages_epoch += 1;
        true
    }

    ///
    /// Pages fetched under a different epoch are stale.
    ///
    /// ### Returns
    /// None when generation is stale
    ///
    pub async fn pages_epoch(&self, generation: u64) -> Option<u64> {
        let state = self.state.lock().await;

        (state.generation == generation).then_some(state.pages_epoch)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn write_of_ended_session_discarded() {
        let cache = NotificationsCache::new();
        let generation = cache.start_session().await;
        cache.end_session().await;

        let written = cache.set_unread_count(generation, 5).await;

        assert!(!written);
        assert_eq!(cache.unread_count().await, None);
        assert_eq!(cache.pages_epoch(generation).await, None);
    }

    #[tokio::test]
    async fn write_of_previous_session_discarded() {
        let cache = NotificationsCache::new();
        let previous = cache.start_session().await;
        let current = cache.start_session().await;

        assert!(!cache.set_unread_count(previous, 5).await);
        assert!(!cache.invalidate(previous).await);
        assert!(cache.set_unread_count(current, 3).await);
        assert_eq!(cache.unread_count().await, Some(3));
    }

    #[tokio::test]
    async fn invalidate_clears_unread_count_and_bumps_epoch() {
        let cache = NotificationsCache::new();
        let generation = cache.start_session().await;
        cache.set_unread_count(generation, 3).await;
        let epoch = cache.pages_epoch(generation).await.unwrap();

        assert!(cache.invalidate(generation).await);

        assert_eq!(cache.unread_count().await, None);
        assert_eq!(cache.pages_epoch(generation).await, Some(epoch + 1));
    }
}
