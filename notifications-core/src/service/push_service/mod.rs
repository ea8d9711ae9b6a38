pub mod channels;
mod disabled_push_transport;
mod dto;
mod error;
mod push_gateway;
mod push_gateway_impl;
mod push_transport;
mod pusher_transport;

pub use disabled_push_transport::*;
pub use dto::*;
pub use error::*;
pub use push_gateway::*;
pub use push_gateway_impl::*;
pub use push_transport::*;
pub use pusher_transport::*;
