mod pusher_client_config;

pub use pusher_client_config::*;
