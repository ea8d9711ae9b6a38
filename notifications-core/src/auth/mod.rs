mod dto;
mod jwt_authorization_validator;
mod jwt_util;
mod role;

pub use dto::User;
pub use jwt_authorization_validator::*;
pub use jwt_util::*;
pub use role::*;

use crate::error::Error;

///
/// Validates that user has all required roles.
///
/// ### Errors
/// - [Error::MissingRole] with the first role user does not have
///
pub fn require_all_roles(user: &User, roles: &[Role]) -> Result<(), Error> {
    for role in roles {
        let role: &'static str = (*role).into();
        if !user.roles.iter().any(|user_role| user_role == role) {
            return Err(Error::MissingRole(role));
        }
    }

    Ok(())
}
