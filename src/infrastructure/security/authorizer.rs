// src/infrastructure/security/authorizer.rs
use super::{SUPER_ADMIN_ROLE, USER_MODEL_TYPE};
use crate::application::{
    dto::Actor,
    error::{ApplicationError, ApplicationResult},
    ports::authorization::Authorizer,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Permission checks against the role/permission tables.
///
/// A permission is held when it is granted directly, granted through one
/// of the account's roles, or when the account has the super-admin role.
#[derive(Clone)]
pub struct PostgresAuthorizer {
    pool: PgPool,
}

impl PostgresAuthorizer {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Authorizer for PostgresAuthorizer {
    async fn can(&self, actor: &Actor, permission: &str) -> ApplicationResult<bool> {
        let allowed = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM model_has_roles mr
                 JOIN roles r ON r.id = mr.role_id
                 WHERE mr.model_type = $2 AND mr.model_id = $1 AND r.name = $4
             ) OR EXISTS (
                 SELECT 1 FROM permissions p
                 JOIN role_has_permissions rp ON rp.permission_id = p.id
                 JOIN model_has_roles mr ON mr.role_id = rp.role_id
                 WHERE p.name = $3 AND mr.model_type = $2 AND mr.model_id = $1
             ) OR EXISTS (
                 SELECT 1 FROM permissions p
                 JOIN model_has_permissions mp ON mp.permission_id = p.id
                 WHERE p.name = $3 AND mp.model_type = $2 AND mp.model_id = $1
             )",
        )
        .bind(actor.id.0)
        .bind(USER_MODEL_TYPE)
        .bind(permission)
        .bind(SUPER_ADMIN_ROLE)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        if !allowed {
            tracing::debug!(actor = actor.id.0, permission, "permission denied");
        }
        Ok(allowed)
    }
}
