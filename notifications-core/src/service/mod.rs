pub mod channel_authorization_service;
pub mod notifications_service;
pub mod push_service;
