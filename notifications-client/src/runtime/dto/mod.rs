mod runtime_config;

pub use runtime_config::*;
