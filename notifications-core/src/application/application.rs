use super::{ApplicationMiddleware, ApplicationState};
use crate::routing;
use axum::Router;

pub fn create_application(
    application_state: ApplicationState,
    application_middleware: ApplicationMiddleware,
) -> Router {
    routing::routing(&application_middleware)
        .layer(application_middleware.body_limit)
        .layer(application_middleware.propagate_request_id)
        .layer(application_middleware.trace)
        .layer(application_middleware.set_request_id)
        .with_state(application_state)
}
