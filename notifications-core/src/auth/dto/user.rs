use std::{fmt::Debug, ops::Deref, sync::Arc};
use uuid::Uuid;

///
/// Session user extracted from a validated JWT.
///
/// Cloned into every request context, so data lives behind an Arc.
///
#[derive(Clone)]
pub struct User {
    inner: Arc<UserData>,
}

pub struct UserData {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: Uuid, roles: Vec<String>) -> Self {
        Self {
            inner: Arc::new(UserData { id, roles }),
        }
    }
}

impl Deref for User {
    type Target = UserData;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("roles", &self.roles)
            .finish()
    }
}
