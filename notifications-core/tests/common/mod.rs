#![allow(dead_code)]

use axum::{
    async_trait,
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};
use notifications_core::{
    application::{create_application, ApplicationMiddleware, ApplicationState},
    dto::output,
    repository::{
        NewNotification, Notification, NotificationsRepository, NotificationsRepositoryMemory,
    },
    service::{
        notifications_service::NotificationsServiceConfig,
        push_service::{self, DisabledPushTransport, PushTransport},
    },
};
use serde_json::{json, Value};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use time::macros::datetime;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &[u8] = b"integration tests secret";
pub const MAX_HTTP_CONTENT_LEN: usize = 4096;
pub const PRODUCE_ROLE: &str = "notifications_produce";
pub const ADMIN_ROLE: &str = "notifications_admin";

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<NotificationsRepositoryMemory>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_transport(Arc::new(DisabledPushTransport))
}

pub fn create_test_app_with_transport(transport: Arc<dyn PushTransport>) -> TestApp {
    let repository = Arc::new(NotificationsRepositoryMemory::new());
    let state = ApplicationState::new(
        NotificationsServiceConfig::default(),
        repository.clone(),
        transport,
    );
    let middleware = ApplicationMiddleware::new(
        DecodingKey::from_secret(JWT_SECRET),
        vec![Algorithm::HS256],
        MAX_HTTP_CONTENT_LEN,
    );

    TestApp {
        router: create_application(state, middleware),
        repository,
    }
}

pub fn create_jwt(user_id: Uuid, roles: &[&str]) -> String {
    let claims = json!({
        "sub": user_id,
        "exp": 253402210800_i64,
        "realm_access": {
            "roles": roles,
        }
    });

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: Value,
}

pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    jwt: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(jwt) = jwt {
        request = request.header(header::AUTHORIZATION, format!("Bearer {jwt}"));
    }
    let request = match body {
        Some(body) => {
            let bytes = serde_json::to_vec(&body).unwrap();
            request
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, bytes.len())
                .body(Body::from(bytes))
                .unwrap()
        }
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // middleware rejections come with plain text bodies
    let body = match bytes.is_empty() {
        true => Value::Null,
        false => serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
    };

    TestResponse {
        status,
        request_id,
        body,
    }
}

///
/// Inserts notifications titled N1..=Ncount, one second apart,
/// so N<count> is the newest
///
pub async fn insert_notifications(
    repository: &NotificationsRepositoryMemory,
    user_id: Uuid,
    count: u64,
) -> Vec<Notification> {
    let start = datetime!(2024-06-01 12:00 UTC);
    let mut inserted = Vec::new();
    for i in 1..=count {
        let notification = repository
            .insert(NewNotification {
                user_id,
                title: format!("N{i}"),
                message: format!("message {i}"),
                link: None,
                created_at: start + Duration::from_secs(i),
            })
            .await
            .unwrap();
        inserted.push(notification);
    }

    inserted
}

pub fn titles(page: &Value) -> Vec<String> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|notification| notification["title"].as_str().unwrap().to_string())
        .collect()
}

pub fn new_notification_body(user_id: Uuid) -> Value {
    json!({
        "userId": user_id,
        "title": "Invoice ready",
        "message": "Your invoice for June is ready",
        "link": "https://example.com/invoices/6",
    })
}

pub struct TriggeredEvent {
    pub channel: String,
    pub event: String,
    pub payload: Value,
}

///
/// Transport remembering every event instead of sending it
///
#[derive(Default)]
pub struct RecordingPushTransport {
    pub events: Mutex<Vec<TriggeredEvent>>,
}

#[async_trait]
impl PushTransport for RecordingPushTransport {
    async fn trigger(
        &self,
        channel: &str,
        event: &str,
        payload: &Value,
    ) -> Result<(), push_service::Error> {
        self.events.lock().unwrap().push(TriggeredEvent {
            channel: channel.to_string(),
            event: event.to_string(),
            payload: payload.clone(),
        });

        Ok(())
    }

    fn authorize_channel(
        &self,
        socket_id: &str,
        channel: &str,
    ) -> Option<output::ChannelAuthorization> {
        Some(output::ChannelAuthorization {
            auth: format!("test-key:{socket_id}:{channel}"),
        })
    }
}

///
/// Transport whose push server is always unavailable
///
pub struct FailingPushTransport;

#[async_trait]
impl PushTransport for FailingPushTransport {
    async fn trigger(
        &self,
        _channel: &str,
        _event: &str,
        _payload: &Value,
    ) -> Result<(), push_service::Error> {
        Err(push_service::Error::Status(StatusCode::SERVICE_UNAVAILABLE))
    }

    fn authorize_channel(
        &self,
        _socket_id: &str,
        _channel: &str,
    ) -> Option<output::ChannelAuthorization> {
        None
    }
}
