use super::ApplicationEnv;
use crate::{auth::JwtAuthorizationValidator, context::REQUEST_ID_HEADER};
use axum::{body::Body, http::Request};
use jsonwebtoken::{Algorithm, DecodingKey};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
    validate_request::ValidateRequestHeaderLayer,
};
use tracing::Span;

pub type RequestTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request<Body>) -> Span>;

///
/// Layers of the notifications service.
///
/// `auth` guards routes only, the rest wraps the whole router:
/// request id is assigned first, so the request span and every
/// service span can carry it.
///
pub struct ApplicationMiddleware {
    pub auth: ValidateRequestHeaderLayer<JwtAuthorizationValidator>,
    pub body_limit: RequestBodyLimitLayer,
    pub set_request_id: SetRequestIdLayer<MakeRequestUuid>,
    pub propagate_request_id: PropagateRequestIdLayer,
    pub trace: RequestTraceLayer,
}

impl ApplicationMiddleware {
    pub fn new(
        jwt_key: DecodingKey,
        jwt_algorithms: Vec<Algorithm>,
        max_http_content_len: usize,
    ) -> Self {
        let validator = JwtAuthorizationValidator::new(jwt_key, jwt_algorithms);

        Self {
            auth: ValidateRequestHeaderLayer::custom(validator),
            body_limit: RequestBodyLimitLayer::new(max_http_content_len),
            set_request_id: SetRequestIdLayer::x_request_id(MakeRequestUuid),
            propagate_request_id: PropagateRequestIdLayer::x_request_id(),
            trace: TraceLayer::new_for_http().make_span_with(make_request_span as fn(&Request<Body>) -> Span),
        }
    }
}

pub fn create_middleware(env: &ApplicationEnv) -> ApplicationMiddleware {
    ApplicationMiddleware::new(
        env.jwt_key.clone(),
        env.jwt_algorithms.clone(),
        env.max_http_content_len,
    )
}

fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{
        http::{Method, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    fn router() -> Router {
        let middleware =
            ApplicationMiddleware::new(DecodingKey::from_secret(b"secret"), vec![Algorithm::HS256], 8);

        Router::new()
            .route("/", post(|body: String| async move { body }))
            .layer(middleware.body_limit)
            .layer(middleware.propagate_request_id)
            .layer(middleware.trace)
            .layer(middleware.set_request_id)
    }

    fn request(body: &'static str, request_id: Option<&str>) -> Request<Body> {
        let mut request = Request::builder().method(Method::POST).uri("/");
        if let Some(request_id) = request_id {
            request = request.header(REQUEST_ID_HEADER, request_id);
        }

        request.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn request_id_generated() {
        let response = router().oneshot(request("ok", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn request_id_kept_from_caller() {
        let response = router()
            .oneshot(request("ok", Some("req-42")))
            .await
            .unwrap();

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
    }

    #[tokio::test]
    async fn body_over_limit_rejected() {
        let response = router()
            .oneshot(request("longer than eight bytes", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
