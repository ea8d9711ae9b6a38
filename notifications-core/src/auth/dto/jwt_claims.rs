use serde::Deserialize;
use uuid::Uuid;

///
/// Claims read from the session token.
/// `exp` is checked by `jsonwebtoken::Validation` and not needed afterwards.
///
#[derive(Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,
    /// Tokens of regular users usually carry no roles at all
    #[serde(default)]
    pub realm_access: JwtClaimsRealmAccess,
}

#[derive(Default, Deserialize)]
pub struct JwtClaimsRealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}
