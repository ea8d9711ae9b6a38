mod pusher_config;

pub use pusher_config::*;
