use super::NotificationsApi;
use crate::{
    dto::{
        ChannelAuthorization, Notification, NotificationsPage, PageRequest, Session, UnreadCount,
    },
    error::Error,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;
use std::time::Duration;

pub struct HttpNotificationsApi {
    client: Client,
    base_url: String,
}

impl HttpNotificationsApi {
    ///
    /// Creates client of the service mounted at `base_url`,
    /// e.g. `https://example.com/api/v1`
    ///
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    async fn send(request: RequestBuilder, session: &Session) -> Result<Response, Error> {
        let response = request.bearer_auth(&session.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url = %response.url(), "request rejected");
            return Err(Error::Status(status));
        }

        Ok(response)
    }
}

#[async_trait]
impl NotificationsApi for HttpNotificationsApi {
    async fn get_notifications(
        &self,
        session: &Session,
        request: PageRequest,
    ) -> Result<NotificationsPage, Error> {
        let mut query = vec![("limit", request.limit.to_string())];
        if let Some(cursor) = request.cursor {
            query.push(("cursor", cursor));
        }
        if request.unread_only {
            query.push(("unreadOnly", "true".to_string()));
        }

        let request = self
            .client
            .get(format!("{}/notifications", self.base_url))
            .query(&query);
        let page = Self::send(request, session).await?.json().await?;

        Ok(page)
    }

    async fn get_unread_count(&self, session: &Session) -> Result<u64, Error> {
        let request = self
            .client
            .get(format!("{}/notifications/unread-count", self.base_url));
        let unread_count = Self::send(request, session)
            .await?
            .json::<UnreadCount>()
            .await?;

        Ok(unread_count.count)
    }

    async fn mark_read(
        &self,
        session: &Session,
        notification_id: &str,
    ) -> Result<Notification, Error> {
        let request = self
            .client
            .post(format!("{}/notifications/mark-read", self.base_url))
            .json(&json!({ "notificationId": notification_id }));
        let notification = Self::send(request, session).await?.json().await?;

        Ok(notification)
    }

    async fn mark_all_read(&self, session: &Session) -> Result<(), Error> {
        let request = self
            .client
            .post(format!("{}/notifications/mark-all-read", self.base_url));
        Self::send(request, session).await?;

        Ok(())
    }

    async fn authorize_channel(
        &self,
        session: &Session,
        socket_id: &str,
        channel_name: &str,
    ) -> Result<Option<ChannelAuthorization>, Error> {
        let request = self
            .client
            .post(format!("{}/push/auth", self.base_url))
            .json(&json!({
                "socket_id": socket_id,
                "channel_name": channel_name,
            }));
        let authorization = Self::send(request, session).await?.json().await?;

        Ok(authorization)
    }
}
