use super::{dto::JwtClaims, User};
use anyhow::anyhow;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderValue, Request, Response, StatusCode},
    response::IntoResponse,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tower_http::validate_request::ValidateRequest;

///
/// Validates bearer JWT in Authorization header.
/// On success the session [User] is inserted into request extensions,
/// otherwise request is rejected with 401.
///
#[derive(Clone)]
pub struct JwtAuthorizationValidator {
    inner: Arc<JwtAuthorizationValidatorInner>,
}

struct JwtAuthorizationValidatorInner {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthorizationValidator {
    pub fn new(key: DecodingKey, algorithms: Vec<Algorithm>) -> Self {
        let mut validation = Validation::default();
        validation.algorithms = algorithms;

        Self {
            inner: Arc::new(JwtAuthorizationValidatorInner { key, validation }),
        }
    }

    fn parse_authorization_header(
        &self,
        authorization_header: Option<&HeaderValue>,
    ) -> anyhow::Result<User> {
        let authorization_header =
            authorization_header.ok_or(anyhow!("missing Authorization header"))?;
        let authorization_value = authorization_header
            .to_str()
            .map_err(|_| anyhow!("illegal character in Authorization header"))?;
        let token = authorization_value
            .strip_prefix("Bearer ")
            .ok_or(anyhow!("unsupported authorization type"))?;

        let token_data =
            jsonwebtoken::decode::<JwtClaims>(token, &self.inner.key, &self.inner.validation)
                .map_err(|err| anyhow!("invalid jwt: {err}"))?;

        Ok(User::new(
            token_data.claims.sub,
            token_data.claims.realm_access.roles,
        ))
    }
}

impl<B> ValidateRequest<B> for JwtAuthorizationValidator {
    type ResponseBody = Body;

    fn validate(&mut self, request: &mut Request<B>) -> Result<(), Response<Self::ResponseBody>> {
        let authorization_header = request.headers().get(AUTHORIZATION);

        let user = self
            .parse_authorization_header(authorization_header)
            .map_err(|err| {
                tracing::warn!(%err, "auth error");
                StatusCode::UNAUTHORIZED.into_response()
            })?;

        request.extensions_mut().insert(user);

        Ok(())
    }
}
