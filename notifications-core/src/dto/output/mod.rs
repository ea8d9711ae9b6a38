mod channel_authorization;
mod notification;
mod notifications_page;
mod success;
mod unread_count;

pub use channel_authorization::*;
pub use notification::*;
pub use notifications_page::*;
pub use success::*;
pub use unread_count::*;
