mod disabled_push_subscriber;
mod dto;
mod push_subscriber;
mod pusher_connection;
mod pusher_message;
mod pusher_subscriber;

pub use disabled_push_subscriber::*;
pub use dto::*;
pub use push_subscriber::*;
pub use pusher_subscriber::*;

pub const NOTIFICATION_EVENT: &str = "notification";

pub fn private_user_channel(user_id: uuid::Uuid) -> String {
    format!("private-user-{user_id}")
}
