// tests/support/mocks/security.rs
use profil_cms::{
    application::dto::Actor,
    domain::user::UserId,
    infrastructure::security::{StaticAuthorizer, StaticTokenResolver},
};

/// Super admin: every permission.
pub const ADMIN_TOKEN: &str = "admin-token";
/// Article and category editor without `publish artikel`.
pub const EDITOR_TOKEN: &str = "editor-token";
/// Authenticated account with no permissions at all.
pub const STRANGER_TOKEN: &str = "stranger-token";

pub fn admin() -> Actor {
    Actor::new(UserId(1), "admin")
}

pub fn editor() -> Actor {
    Actor::new(UserId(2), "editor")
}

pub fn stranger() -> Actor {
    Actor::new(UserId(3), "stranger")
}

pub fn test_authorizer() -> StaticAuthorizer {
    StaticAuthorizer::new().super_admin(admin().id).grant(
        editor().id,
        [
            "view artikel",
            "create artikel",
            "edit artikel",
            "delete artikel",
            "view kategori",
            "create kategori",
            "edit kategori",
        ],
    )
}

pub fn test_token_resolver() -> StaticTokenResolver {
    StaticTokenResolver::new()
        .with_token(ADMIN_TOKEN, admin())
        .with_token(EDITOR_TOKEN, editor())
        .with_token(STRANGER_TOKEN, stranger())
}
