use super::{NotificationsService, NotificationsServiceConfig};
use crate::{
    context::RequestContext,
    dto::{input, output},
    error::Error,
    repository::{self, FindOptions, NewNotification, NotificationsRepository},
    service::push_service::PushGateway,
};
use axum::async_trait;
use bson::oid::ObjectId;
use reqwest::Url;
use std::sync::Arc;
use time::OffsetDateTime;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 50;

pub struct NotificationsServiceImpl {
    config: NotificationsServiceConfig,
    repository: Arc<dyn NotificationsRepository>,
    push_gateway: Arc<dyn PushGateway>,
}

impl NotificationsServiceImpl {
    pub fn new(
        config: NotificationsServiceConfig,
        repository: Arc<dyn NotificationsRepository>,
        push_gateway: Arc<dyn PushGateway>,
    ) -> Self {
        Self {
            config,
            repository,
            push_gateway,
        }
    }

    fn validate_new_notification(
        &self,
        notification: &input::NewNotification,
    ) -> Result<(), Error> {
        Self::validate_text("title", &notification.title, self.config.max_title_len)?;
        Self::validate_text("message", &notification.message, self.config.max_message_len)?;

        if let Some(link) = &notification.link {
            if Url::parse(link).is_err() {
                return Err(Error::Validation {
                    field: "link",
                    reason: "must be an absolute URL",
                });
            }
        }

        Ok(())
    }

    fn validate_text(field: &'static str, text: &str, max_len: usize) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::Validation {
                field,
                reason: "must not be empty",
            });
        }
        if text.chars().count() > max_len {
            return Err(Error::Validation {
                field,
                reason: "too long",
            });
        }

        Ok(())
    }

    fn parse_limit(limit: Option<u32>) -> Result<u32, Error> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(Error::Validation {
                field: "limit",
                reason: "must be between 1 and 50",
            });
        }

        Ok(limit)
    }

    fn parse_id(field: &'static str, id: &str) -> Result<ObjectId, Error> {
        ObjectId::parse_str(id).map_err(|_| Error::Validation {
            field,
            reason: "not a notification id",
        })
    }

    ///
    /// Push is advisory, stored notification stays authoritative.
    /// Failure is logged and swallowed.
    ///
    async fn publish_best_effort(&self, notification: &output::Notification) {
        match self
            .push_gateway
            .publish(notification.user_id, notification.clone())
            .await
        {
            Ok(()) => tracing::info!(id = %notification.id, "published notification"),
            Err(err) => {
                tracing::error!(%err, id = %notification.id, "failed to publish notification")
            }
        }
    }
}

#[async_trait]
impl NotificationsService for NotificationsServiceImpl {
    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn get_notifications(
        &self,
        ctx: &RequestContext,
        query: input::NotificationsQuery,
    ) -> Result<output::NotificationsPage, Error> {
        tracing::info!("finding notifications");
        tracing::trace!(?query);

        let limit = Self::parse_limit(query.limit)?;
        let cursor = match query.cursor.as_deref() {
            None | Some("") => None,
            Some(cursor) => Some(Self::parse_id("cursor", cursor)?),
        };

        let mut notifications = self
            .repository
            .find_many_by_user(
                ctx.user.id,
                FindOptions {
                    cursor,
                    limit,
                    unread_only: query.unread_only,
                },
            )
            .await?;

        let has_more = notifications.len() > limit as usize;
        notifications.truncate(limit as usize);
        let next_cursor = match has_more {
            true => notifications.last().map(|notification| notification.id.to_hex()),
            false => None,
        };

        let unread_count = self.repository.count_unread(ctx.user.id).await?;
        tracing::info!(count = notifications.len(), has_more, "found notifications");

        Ok(output::NotificationsPage {
            data: notifications
                .into_iter()
                .map(output::Notification::from)
                .collect(),
            next_cursor,
            has_more,
            unread_count,
        })
    }

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn get_unread_count(&self, ctx: &RequestContext) -> Result<output::UnreadCount, Error> {
        let count = self.repository.count_unread(ctx.user.id).await?;
        tracing::debug!(count, "counted unread notifications");

        Ok(output::UnreadCount { count })
    }

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn mark_as_read(
        &self,
        ctx: &RequestContext,
        mark_read: input::MarkRead,
    ) -> Result<output::Notification, Error> {
        tracing::info!(notification_id = %mark_read.notification_id, "marking notification as read");

        let id = Self::parse_id("notificationId", &mark_read.notification_id)?;

        let notification = self
            .repository
            .find(id)
            .await?
            .ok_or(Error::NotificationNotExist)?;

        if notification.user_id != ctx.user.id {
            return Err(Error::NotificationNotOwned);
        }

        let notification = self
            .repository
            .update_read_at(id, OffsetDateTime::now_utc())
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::NotificationNotExist,
                err => Error::Database(err),
            })?;
        tracing::info!("marked notification as read");

        Ok(notification.into())
    }

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn mark_all_as_read(&self, ctx: &RequestContext) -> Result<output::Success, Error> {
        tracing::info!("marking all notifications as read");

        let updated = self
            .repository
            .update_many_read_at(ctx.user.id, OffsetDateTime::now_utc())
            .await?;
        tracing::info!(updated, "marked all notifications as read");

        Ok(output::Success::new())
    }

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn create_notification(
        &self,
        ctx: &RequestContext,
        notification: input::NewNotification,
    ) -> Result<output::Notification, Error> {
        tracing::info!(recipient = %notification.user_id, "creating notification");
        tracing::trace!(?notification);

        self.validate_new_notification(&notification)?;

        let notification = self
            .repository
            .insert(NewNotification {
                user_id: notification.user_id,
                title: notification.title,
                message: notification.message,
                link: notification.link,
                created_at: OffsetDateTime::now_utc(),
            })
            .await?;
        tracing::info!(id = %notification.id, "created notification");

        Ok(notification.into())
    }

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn create_notification_with_push(
        &self,
        ctx: &RequestContext,
        notification: input::NewNotification,
    ) -> Result<output::Notification, Error> {
        let notification = self.create_notification(ctx, notification).await?;

        self.publish_best_effort(&notification).await;

        Ok(notification)
    }

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id, user_id = %ctx.user.id))]
    async fn delete_notification(&self, ctx: &RequestContext, id: String) -> Result<(), Error> {
        tracing::info!(%id, "deleting notification");

        let id = Self::parse_id("id", &id)?;

        self.repository
            .delete(id)
            .await
            .map_err(|err| match err {
                repository::Error::NoDocumentUpdated => Error::NotificationNotExist,
                err => Error::Database(err),
            })?;
        tracing::info!("deleted notification");

        Ok(())
    }
}
