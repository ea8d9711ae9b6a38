use super::{
    pusher_message::{self, PusherMessage},
    NOTIFICATION_EVENT,
};
use crate::{dto::Notification, error::Error};
use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub type WsSink = SplitSink<WsStream, Message>;
pub type WsSource = SplitStream<WsStream>;

///
/// Reads next protocol message, answering pings on the way
///
pub async fn next_message(
    ws_tx: &mut WsSink,
    ws_rx: &mut WsSource,
) -> Result<PusherMessage, Error> {
    loop {
        let message = match ws_rx.next().await {
            Some(message) => message?,
            None => return Err(Error::Protocol("connection closed".to_string())),
        };

        let Some(message) = PusherMessage::from_ws_message(message)? else {
            continue;
        };

        match message.event.as_str() {
            pusher_message::PING => {
                ws_tx.send(PusherMessage::pong().to_ws_message()?).await?;
                tracing::trace!("answered ping");
            }
            _ => return Ok(message),
        }
    }
}

///
/// Subscribed connection forwarding notification events
/// until cancelled or closed by the server
///
pub struct PusherConnection {
    channel: String,
    ws_tx: WsSink,
    ws_rx: WsSource,
    events_tx: mpsc::Sender<Notification>,
    cancel: CancellationToken,
}

impl PusherConnection {
    pub fn new(
        channel: String,
        ws_tx: WsSink,
        ws_rx: WsSource,
        events_tx: mpsc::Sender<Notification>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            channel,
            ws_tx,
            ws_rx,
            events_tx,
            cancel,
        }
    }

    #[tracing::instrument(name = "Pusher connection", skip_all, fields(channel = %self.channel))]
    pub async fn run(mut self) {
        match self.try_run().await {
            Ok(()) => {
                tracing::debug!("unsubscribing");
                let unsubscribe = PusherMessage::unsubscribe(&self.channel).to_ws_message();
                match unsubscribe {
                    Ok(message) => {
                        if let Err(err) = self.ws_tx.send(message).await {
                            tracing::warn!(%err, "failed to unsubscribe");
                        }
                    }
                    Err(err) => tracing::warn!(%err, "failed to encode unsubscribe"),
                }
            }
            Err(err) => tracing::warn!(%err, "connection failed"),
        }

        match self.ws_tx.close().await {
            Ok(()) => tracing::debug!("connection closed"),
            Err(err) => tracing::debug!(%err, "failed to close connection"),
        }
    }

    async fn try_run(&mut self) -> Result<(), Error> {
        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => return Ok(()),

                message = next_message(&mut self.ws_tx, &mut self.ws_rx) => {
                    if !self.process_message(message?)? {
                        return Ok(());
                    }
                }
            }
        }
    }

    ///
    /// ### Returns
    /// false when subscriber is gone
    ///
    fn process_message(&mut self, message: PusherMessage) -> Result<bool, Error> {
        match message.event.as_str() {
            NOTIFICATION_EVENT if message.channel.as_deref() == Some(self.channel.as_str()) => {
                let notification = message.decode_data::<Notification>()?;
                tracing::debug!(id = %notification.id, "received notification");

                match self.events_tx.try_send(notification) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(notification)) => {
                        tracing::warn!(id = %notification.id, "events buffer full, event dropped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => return Ok(false),
                }
            }
            pusher_message::ERROR => {
                tracing::warn!(data = %message.data, "push server error");
            }
            event => tracing::trace!(%event, "ignored event"),
        }

        Ok(true)
    }
}
