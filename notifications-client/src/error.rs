use reqwest::StatusCode;
use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response status {0}")]
    Status(StatusCode),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("push protocol error: {0}")]
    Protocol(String),

    #[error("channel authorization refused")]
    ChannelAuthorizationRefused,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("notifications changed while streaming")]
    Invalidated,
}
