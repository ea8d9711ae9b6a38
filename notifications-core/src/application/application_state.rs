use super::ApplicationEnv;
use crate::{
    repository::{NotificationsRepository, NotificationsRepositoryImpl},
    service::{
        channel_authorization_service::{
            ChannelAuthorizationService, ChannelAuthorizationServiceImpl,
        },
        notifications_service::{
            NotificationsService, NotificationsServiceConfig, NotificationsServiceImpl,
        },
        push_service::{DisabledPushTransport, PushGatewayImpl, PushTransport, PusherTransport},
    },
};
use axum::extract::FromRef;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub notifications_service: Arc<dyn NotificationsService>,
    pub channel_authorization_service: Arc<dyn ChannelAuthorizationService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

impl ApplicationState {
    ///
    /// Wires services on top of given store and push transport
    ///
    pub fn new(
        config: NotificationsServiceConfig,
        repository: Arc<dyn NotificationsRepository>,
        push_transport: Arc<dyn PushTransport>,
    ) -> Self {
        let push_gateway = Arc::new(PushGatewayImpl::new(push_transport.clone()));

        let notifications_service =
            NotificationsServiceImpl::new(config, repository, push_gateway);
        let channel_authorization_service = ChannelAuthorizationServiceImpl::new(push_transport);

        Self {
            notifications_service: Arc::new(notifications_service),
            channel_authorization_service: Arc::new(channel_authorization_service),
        }
    }
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let notifications_repository = NotificationsRepositoryImpl::new(db).await?;
    let notifications_repository = Arc::new(notifications_repository);

    tracing::info!("creating push transport");
    let push_transport: Arc<dyn PushTransport> = match &env.push {
        Some(config) => {
            tracing::info!(host = %config.host, port = config.port, "push enabled");
            Arc::new(PusherTransport::new(config.clone())?)
        }
        None => {
            tracing::info!("push disabled");
            Arc::new(DisabledPushTransport)
        }
    };

    tracing::info!("creating services");
    let config = NotificationsServiceConfig {
        max_title_len: env.max_title_len,
        max_message_len: env.max_message_len,
    };
    let state = ApplicationState::new(config, notifications_repository, push_transport);

    Ok((state, ApplicationStateToClose { db_client }))
}
