use super::{Error, PushTransport, PusherConfig};
use crate::dto::output;
use axum::async_trait;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use serde_json::Value;
use sha2::Sha256;
use time::OffsetDateTime;

type HmacSha256 = Hmac<Sha256>;

const AUTH_VERSION: &str = "1.0";

#[derive(Serialize)]
struct TriggerBody<'a> {
    name: &'a str,
    channels: [&'a str; 1],
    /// Pusher expects event data as a JSON encoded string
    data: String,
}

///
/// Transport speaking Pusher Channels HTTP API.
/// Works with any compatible server (Pusher, Soketi).
///
pub struct PusherTransport {
    config: PusherConfig,
    client: Client,
    base_url: String,
    mac: HmacSha256,
}

impl PusherTransport {
    pub fn new(config: PusherConfig) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let scheme = match config.use_tls {
            true => "https",
            false => "http",
        };
        let base_url = format!("{scheme}://{}:{}", config.host, config.port);
        let mac = HmacSha256::new_from_slice(config.secret.as_bytes())
            .map_err(|_| Error::InvalidSecret)?;

        Ok(Self {
            config,
            client,
            base_url,
            mac,
        })
    }

    fn sign(&self, data: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(data.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }

    ///
    /// Builds signed query of the trigger request.
    /// Parameters must be sorted by name before signing.
    ///
    fn signed_query(&self, path: &str, body: &[u8], timestamp: i64) -> String {
        let body_md5 = hex::encode(Md5::digest(body));
        let query = format!(
            "auth_key={}&auth_timestamp={timestamp}&auth_version={AUTH_VERSION}&body_md5={body_md5}",
            self.config.key
        );
        let signature = self.sign(&format!("POST\n{path}\n{query}"));

        format!("{query}&auth_signature={signature}")
    }
}

#[async_trait]
impl PushTransport for PusherTransport {
    async fn trigger(&self, channel: &str, event: &str, payload: &Value) -> Result<(), Error> {
        let body = TriggerBody {
            name: event,
            channels: [channel],
            data: serde_json::to_string(payload)?,
        };
        let body = serde_json::to_vec(&body)?;

        let path = format!("/apps/{}/events", self.config.app_id);
        let query = self.signed_query(&path, &body, OffsetDateTime::now_utc().unix_timestamp());

        tracing::debug!(channel, event, "triggering push event");
        let response = self
            .client
            .post(format!("{}{path}?{query}", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        Ok(())
    }

    fn authorize_channel(
        &self,
        socket_id: &str,
        channel: &str,
    ) -> Option<output::ChannelAuthorization> {
        let signature = self.sign(&format!("{socket_id}:{channel}"));

        Some(output::ChannelAuthorization {
            auth: format!("{}:{signature}", self.config.key),
        })
    }
}
