mod channel_authorization;
mod notification;
mod notifications_page;
mod page_request;
mod session;
mod unread_count;

pub use channel_authorization::*;
pub use notification::*;
pub use notifications_page::*;
pub use page_request::*;
pub use session::*;
pub use unread_count::*;
