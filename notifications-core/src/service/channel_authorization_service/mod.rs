mod channel_authorization_service;
mod channel_authorization_service_impl;

pub use channel_authorization_service::*;
pub use channel_authorization_service_impl::*;
