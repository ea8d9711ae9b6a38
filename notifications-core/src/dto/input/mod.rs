mod channel_auth;
mod mark_read;
mod new_notification;
mod notifications_query;

pub use channel_auth::*;
pub use mark_read::*;
pub use new_notification::*;
pub use notifications_query::*;
