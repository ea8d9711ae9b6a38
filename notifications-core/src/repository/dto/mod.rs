mod find_options;
mod new_notification;
mod notification;

pub use find_options::*;
pub use new_notification::*;
pub use notification::*;
