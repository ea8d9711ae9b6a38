use super::session_context::SessionContext;
use crate::{
    dto::{Notification, NotificationsPage, PageRequest},
    error::Error,
};
use futures::{stream, Stream};
use std::collections::VecDeque;

///
/// Lazily fetched, newest first list of the session notifications.
///
/// Pages are requested one by one with the cursor of the previous page.
/// When the cache gets invalidated (push event, mark read) fetched pages
/// are dropped and scrolling starts again from the newest notification.
///
pub struct InfiniteScroll {
    context: SessionContext,
    limit: u32,
    unread_only: bool,
    epoch: u64,
    pages: Vec<NotificationsPage>,
}

impl InfiniteScroll {
    pub(crate) fn new(context: SessionContext, limit: u32, unread_only: bool, epoch: u64) -> Self {
        Self {
            context,
            limit,
            unread_only,
            epoch,
            pages: Vec::new(),
        }
    }

    ///
    /// Fetches the next page.
    /// Pages invalidated before or during the fetch are dropped
    /// and scrolling starts again from the newest notification.
    ///
    /// ### Returns
    /// None when every page was already fetched
    ///
    /// ### Errors
    /// - [Error::Unauthenticated] when session of the scroll ended
    /// - errors of the api, fetched pages are kept
    ///
    pub async fn next_page(&mut self) -> Result<Option<&NotificationsPage>, Error> {
        self.fetch_next(true).await
    }

    async fn fetch_next(
        &mut self,
        restart_when_invalidated: bool,
    ) -> Result<Option<&NotificationsPage>, Error> {
        loop {
            let epoch = self.current_epoch().await?;
            if epoch != self.epoch {
                if !restart_when_invalidated {
                    return Err(Error::Invalidated);
                }
                tracing::debug!("pages invalidated, restarting");
                self.pages.clear();
                self.epoch = epoch;
            }

            let cursor = match self.pages.last() {
                None => None,
                Some(page) => match (page.has_more, &page.next_cursor) {
                    (true, Some(cursor)) => Some(cursor.clone()),
                    _ => return Ok(None),
                },
            };

            let request = PageRequest {
                cursor,
                limit: self.limit,
                unread_only: self.unread_only,
            };
            let page = self
                .context
                .api
                .get_notifications(&self.context.session, request)
                .await?;

            if self.current_epoch().await? != self.epoch {
                if !restart_when_invalidated {
                    return Err(Error::Invalidated);
                }
                tracing::debug!("pages invalidated while fetching");
                continue;
            }

            self.pages.push(page);
            return Ok(self.pages.last());
        }
    }

    pub fn has_more(&self) -> bool {
        self.pages.last().map(|page| page.has_more).unwrap_or(true)
    }

    ///
    /// Fetched notifications flattened into one sequence
    ///
    pub fn items(&self) -> impl Iterator<Item = &Notification> {
        self.pages.iter().flat_map(|page| page.data.iter())
    }

    ///
    /// Unread count reported with the newest page
    ///
    pub fn unread_count(&self) -> Option<u64> {
        self.pages.first().map(|page| page.unread_count)
    }

    ///
    /// Drops fetched pages, next fetch starts from the newest notification
    ///
    pub fn restart(&mut self) {
        self.pages.clear();
    }

    ///
    /// Turns the scroll into a stream of notifications fetching pages on demand.
    /// Stream ends after the last page or the first error.
    ///
    /// Invalidation before the first notification restarts the scroll.
    /// Once something was yielded, restarting would repeat it, so the stream
    /// yields [Error::Invalidated] and ends instead.
    ///
    pub fn into_stream(self) -> impl Stream<Item = Result<Notification, Error>> {
        let state = StreamState {
            scroll: self,
            buffer: VecDeque::new(),
            yielded: false,
            failed: false,
        };

        stream::unfold(state, |mut state| async move {
            loop {
                if let Some(notification) = state.buffer.pop_front() {
                    state.yielded = true;
                    return Some((Ok(notification), state));
                }
                if state.failed {
                    return None;
                }

                let page = state
                    .scroll
                    .fetch_next(!state.yielded)
                    .await
                    .map(|page| page.map(|page| page.data.clone()));
                match page {
                    Ok(Some(data)) => state.buffer.extend(data),
                    Ok(None) => return None,
                    Err(err) => {
                        state.failed = true;
                        return Some((Err(err), state));
                    }
                }
            }
        })
    }

    async fn current_epoch(&self) -> Result<u64, Error> {
        self.context
            .cache
            .pages_epoch(self.context.generation)
            .await
            .ok_or(Error::Unauthenticated)
    }
}

struct StreamState {
    scroll: InfiniteScroll,
    buffer: VecDeque<Notification>,
    yielded: bool,
    failed: bool,
}
