use serde::Deserialize;

///
/// Body sent by push clients when subscribing to a private channel.
/// Field names follow the push transport convention.
///
#[derive(Debug, Deserialize)]
pub struct ChannelAuth {
    pub socket_id: String,
    pub channel_name: String,
}
