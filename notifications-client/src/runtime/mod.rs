mod delivery_runtime;
mod dto;
mod infinite_scroll;
mod notifications_cache;
mod push_listener;
mod session_context;
mod unread_count_poller;

pub use delivery_runtime::*;
pub use dto::*;
pub use infinite_scroll::*;
pub use notifications_cache::*;
