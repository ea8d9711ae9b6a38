use super::{
    private_user_channel,
    pusher_connection::{next_message, PusherConnection, WsSink, WsSource},
    pusher_message::{self, ConnectionEstablished, PusherMessage},
    PushSubscriber, PusherClientConfig, Subscription,
};
use crate::{api::NotificationsApi, dto::Session, error::Error};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::{sync::mpsc, time::timeout};
use tokio_tungstenite::connect_async;
use tokio_util::sync::CancellationToken;

const PROTOCOL_VERSION: u8 = 7;

///
/// Subscriber speaking Pusher Channels websocket protocol.
/// Channel access is signed by the notifications service.
///
pub struct PusherSubscriber {
    config: PusherClientConfig,
    api: Arc<dyn NotificationsApi>,
}

impl PusherSubscriber {
    pub fn new(config: PusherClientConfig, api: Arc<dyn NotificationsApi>) -> Self {
        Self { config, api }
    }

    fn url(&self) -> String {
        let scheme = match self.config.use_tls {
            true => "wss",
            false => "ws",
        };

        format!(
            "{scheme}://{}:{}/app/{}?protocol={PROTOCOL_VERSION}&client=rust&version={}",
            self.config.host,
            self.config.port,
            self.config.key,
            env!("CARGO_PKG_VERSION"),
        )
    }

    async fn handshake(
        &self,
        session: &Session,
        channel: &str,
        ws_tx: &mut WsSink,
        ws_rx: &mut WsSource,
    ) -> Result<(), Error> {
        let socket_id = loop {
            let message = next_message(ws_tx, ws_rx).await?;
            match message.event.as_str() {
                pusher_message::CONNECTION_ESTABLISHED => {
                    break message.decode_data::<ConnectionEstablished>()?.socket_id;
                }
                pusher_message::ERROR => {
                    return Err(Error::Protocol(format!("connection refused: {}", message.data)));
                }
                _ => {}
            }
        };
        tracing::debug!(%socket_id, "connection established");

        let authorization = self
            .api
            .authorize_channel(session, &socket_id, channel)
            .await?
            .ok_or(Error::ChannelAuthorizationRefused)?;

        ws_tx
            .send(PusherMessage::subscribe(channel, &authorization.auth).to_ws_message()?)
            .await?;

        loop {
            let message = next_message(ws_tx, ws_rx).await?;
            match message.event.as_str() {
                pusher_message::SUBSCRIPTION_SUCCEEDED
                    if message.channel.as_deref() == Some(channel) =>
                {
                    return Ok(());
                }
                pusher_message::SUBSCRIPTION_ERROR | pusher_message::ERROR => {
                    return Err(Error::Protocol(format!("subscription refused: {}", message.data)));
                }
                _ => {}
            }
        }
    }
}

#[async_trait]
impl PushSubscriber for PusherSubscriber {
    #[tracing::instrument(skip_all, fields(user_id = %session.user_id))]
    async fn subscribe(&self, session: &Session) -> Result<Subscription, Error> {
        let channel = private_user_channel(session.user_id);

        let (ws, _) = connect_async(self.url()).await?;
        let (mut ws_tx, mut ws_rx) = ws.split();

        let handshake = self.handshake(session, &channel, &mut ws_tx, &mut ws_rx);
        match timeout(self.config.handshake_timeout, handshake).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Protocol("handshake timed out".to_string())),
        }
        tracing::info!(%channel, "subscribed");

        let (events_tx, events_rx) = mpsc::channel(self.config.event_buffer);
        let cancel = CancellationToken::new();
        let connection = PusherConnection::new(channel, ws_tx, ws_rx, events_tx, cancel.clone());
        tokio::spawn(connection.run());

        Ok(Subscription::new(events_rx, cancel))
    }
}
