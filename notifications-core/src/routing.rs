use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::{require_all_roles, Role},
    context::RequestContext,
    dto::{input, output},
    error::Error,
    service::{
        channel_authorization_service::ChannelAuthorizationService,
        notifications_service::NotificationsService,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route(
            "/api/v1/notifications",
            get(get_notifications).post(post_notification),
        )
        .route(
            "/api/v1/notifications/unread-count",
            get(get_notifications_unread_count),
        )
        .route(
            "/api/v1/notifications/mark-read",
            post(post_notifications_mark_read),
        )
        .route(
            "/api/v1/notifications/mark-all-read",
            post(post_notifications_mark_all_read),
        )
        .route("/api/v1/notifications/:id", delete(delete_notification))
        .route("/api/v1/push/auth", post(post_push_auth))
        .route_layer(application_middleware.auth.clone())
}

async fn get_notifications(
    State(service): State<Arc<dyn NotificationsService>>,
    ctx: RequestContext,
    Query(query): Query<input::NotificationsQuery>,
) -> Result<Json<output::NotificationsPage>, Error> {
    let page = service.get_notifications(&ctx, query).await?;

    Ok(Json(page))
}

async fn post_notification(
    State(service): State<Arc<dyn NotificationsService>>,
    ctx: RequestContext,
    Json(notification): Json<input::NewNotification>,
) -> Result<(StatusCode, Json<output::Notification>), Error> {
    require_all_roles(&ctx.user, &[Role::ProduceNotifications])?;

    let notification = service
        .create_notification_with_push(&ctx, notification)
        .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

async fn get_notifications_unread_count(
    State(service): State<Arc<dyn NotificationsService>>,
    ctx: RequestContext,
) -> Result<Json<output::UnreadCount>, Error> {
    let count = service.get_unread_count(&ctx).await?;

    Ok(Json(count))
}

async fn post_notifications_mark_read(
    State(service): State<Arc<dyn NotificationsService>>,
    ctx: RequestContext,
    Json(mark_read): Json<input::MarkRead>,
) -> Result<Json<output::Notification>, Error> {
    let notification = service.mark_as_read(&ctx, mark_read).await?;

    Ok(Json(notification))
}

async fn post_notifications_mark_all_read(
    State(service): State<Arc<dyn NotificationsService>>,
    ctx: RequestContext,
) -> Result<Json<output::Success>, Error> {
    let success = service.mark_all_as_read(&ctx).await?;

    Ok(Json(success))
}

async fn delete_notification(
    State(service): State<Arc<dyn NotificationsService>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    require_all_roles(&ctx.user, &[Role::Admin])?;

    service.delete_notification(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn post_push_auth(
    State(service): State<Arc<dyn ChannelAuthorizationService>>,
    ctx: RequestContext,
    Json(channel_auth): Json<input::ChannelAuth>,
) -> Result<Json<Option<output::ChannelAuthorization>>, Error> {
    let authorization = service.authorize(&ctx, channel_auth).await?;

    Ok(Json(authorization))
}
