// src/infrastructure/security/mod.rs
pub mod authorizer;
pub mod static_access;
pub mod token;

pub use authorizer::PostgresAuthorizer;
pub use static_access::{StaticAuthorizer, StaticTokenResolver};
pub use token::PostgresTokenResolver;

/// `model_type` under which accounts are stored in the role and token tables.
pub const USER_MODEL_TYPE: &str = r"App\Models\User";

/// Role that holds every permission.
pub const SUPER_ADMIN_ROLE: &str = "super-admin";
