use serde::{Deserialize, Serialize};

///
/// Signature returned to a push client subscribing to a private channel
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAuthorization {
    pub auth: String,
}
