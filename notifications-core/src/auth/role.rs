//!
//! Roles recognized by the service
//!

use strum::{AsRefStr, IntoStaticStr};

#[derive(Debug, Clone, Copy, AsRefStr, IntoStaticStr)]
pub enum Role {
    /// Allows creating notifications for any user
    #[strum(serialize = "notifications_produce")]
    ProduceNotifications,

    #[strum(serialize = "notifications_admin")]
    Admin,
}
