use crate::{auth::User, error::Error};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

///
/// Per request data passed explicitly into every service call.
///
/// Extracted from request parts: the session [User] placed by the auth middleware
/// and the request id set by the request id middleware.
///
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub user: User,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>, user: User) -> Self {
        Self {
            request_id: request_id.into(),
            user,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(Error::Unauthenticated)?;

        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self { request_id, user })
    }
}
