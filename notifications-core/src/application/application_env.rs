use crate::{
    auth::{parse_jwt_algorithms, parse_jwt_key},
    service::push_service::PusherConfig,
};
use anyhow::anyhow;
use jsonwebtoken::{Algorithm, DecodingKey};
use std::{net::SocketAddr, str::FromStr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,

    pub max_http_content_len: usize,
    pub max_title_len: usize,
    pub max_message_len: usize,

    /// Algorithms must belong to the same family
    pub jwt_algorithms: Vec<Algorithm>,
    pub jwt_key: DecodingKey,

    /// None when realtime push is disabled
    pub push: Option<PusherConfig>,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("NOTIFICATIONS_CORE_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("NOTIFICATIONS_CORE_LOG_FILENAME")?;
        let bind_address = Self::parse_env_var("NOTIFICATIONS_CORE_BIND_ADDRESS")?;
        let db_connection_string = Self::env_var("NOTIFICATIONS_CORE_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("NOTIFICATIONS_CORE_DB_NAME")?;
        let max_http_content_len =
            Self::parse_env_var("NOTIFICATIONS_CORE_MAX_HTTP_CONTENT_LEN")?;
        let max_title_len = Self::parse_env_var_or("NOTIFICATIONS_CORE_MAX_TITLE_LEN", 255)?;
        let max_message_len =
            Self::parse_env_var_or("NOTIFICATIONS_CORE_MAX_MESSAGE_LEN", 1000)?;
        let jwt_algorithms =
            parse_jwt_algorithms(&Self::env_var("NOTIFICATIONS_CORE_JWT_ALGORITHMS")?)?;
        let jwt_algorithm = jwt_algorithms.first().copied().ok_or(anyhow!(
            "NOTIFICATIONS_CORE_JWT_ALGORITHMS need to contain at least one algorithm"
        ))?;
        let jwt_key = parse_jwt_key(jwt_algorithm, &Self::env_var("NOTIFICATIONS_CORE_JWT_KEY")?)?;

        let push_enabled = Self::parse_env_var_or("NOTIFICATIONS_CORE_PUSH_ENABLED", false)?;
        let push = match push_enabled {
            true => Some(Self::parse_push()?),
            false => None,
        };

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_name,
            max_http_content_len,
            max_title_len,
            max_message_len,
            jwt_algorithms,
            jwt_key,
            push,
        })
    }

    fn parse_push() -> anyhow::Result<PusherConfig> {
        let app_id = Self::env_var("NOTIFICATIONS_CORE_PUSH_APP_ID")?;
        let key = Self::env_var("NOTIFICATIONS_CORE_PUSH_KEY")?;
        let secret = Self::env_var("NOTIFICATIONS_CORE_PUSH_SECRET")?;
        let host = Self::env_var("NOTIFICATIONS_CORE_PUSH_HOST")?;
        let port = Self::parse_env_var("NOTIFICATIONS_CORE_PUSH_PORT")?;
        let use_tls = Self::parse_env_var_or("NOTIFICATIONS_CORE_PUSH_USE_TLS", false)?;
        let timeout = Self::parse_env_var_or("NOTIFICATIONS_CORE_PUSH_TIMEOUT", 5)?;
        let timeout = Duration::from_secs(timeout);

        Ok(PusherConfig {
            app_id,
            key,
            secret,
            host,
            port,
            use_tls,
            timeout,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn parse_env_var<T>(name: &'static str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        Self::env_var(name)?
            .parse()
            .map_err(|err| anyhow!("environment variable {name} invalid: {err}"))
    }

    fn parse_env_var_or<T>(name: &'static str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match std::env::var(name) {
            Ok(_) => Self::parse_env_var(name),
            Err(_) => Ok(default),
        }
    }
}
