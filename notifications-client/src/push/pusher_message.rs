use crate::error::Error;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::Message;

pub const CONNECTION_ESTABLISHED: &str = "pusher:connection_established";
pub const SUBSCRIPTION_SUCCEEDED: &str = "pusher_internal:subscription_succeeded";
pub const SUBSCRIPTION_ERROR: &str = "pusher:subscription_error";
pub const ERROR: &str = "pusher:error";
pub const PING: &str = "pusher:ping";

///
/// Frame of the Pusher websocket protocol
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PusherMessage {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Deserialize)]
pub struct ConnectionEstablished {
    pub socket_id: String,
}

impl PusherMessage {
    pub fn subscribe(channel: &str, auth: &str) -> Self {
        Self {
            event: "pusher:subscribe".to_string(),
            channel: None,
            data: json!({ "channel": channel, "auth": auth }),
        }
    }

    pub fn unsubscribe(channel: &str) -> Self {
        Self {
            event: "pusher:unsubscribe".to_string(),
            channel: None,
            data: json!({ "channel": channel }),
        }
    }

    pub fn pong() -> Self {
        Self {
            event: "pusher:pong".to_string(),
            channel: None,
            data: json!({}),
        }
    }

    ///
    /// Decodes event data.
    /// Server sends data as JSON encoded string, but plain objects are accepted too.
    ///
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let data = match &self.data {
            Value::String(data) => serde_json::from_str(data)?,
            data => serde_json::from_value(data.clone())?,
        };

        Ok(data)
    }

    pub fn to_ws_message(&self) -> Result<Message, Error> {
        Ok(Message::Text(serde_json::to_string(self)?))
    }

    ///
    /// ### Returns
    /// None for frames that do not carry protocol messages
    ///
    pub fn from_ws_message(message: Message) -> Result<Option<Self>, Error> {
        match message {
            Message::Text(text) => Ok(Some(serde_json::from_str(&text)?)),
            Message::Close(_) => Err(Error::Protocol("connection closed by server".to_string())),
            _ => Ok(None),
        }
    }
}
