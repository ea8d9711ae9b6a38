use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("push request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("push rejected with status {0}")]
    Status(StatusCode),

    #[error("push payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid push secret")]
    InvalidSecret,
}
