//!
//! Naming of broadcast channels and events
//!

use uuid::Uuid;

pub const PRIVATE_USER_CHANNEL_PREFIX: &str = "private-user-";

/// Event published whenever a notification is created
pub const NOTIFICATION_EVENT: &str = "notification";

pub fn private_user_channel(user_id: Uuid) -> String {
    format!("{PRIVATE_USER_CHANNEL_PREFIX}{user_id}")
}

///
/// Extracts the user part of a private user channel.
///
/// ### Returns
/// None when channel is not a private user channel
///
pub fn private_user_channel_owner(channel: &str) -> Option<&str> {
    channel.strip_prefix(PRIVATE_USER_CHANNEL_PREFIX)
}
