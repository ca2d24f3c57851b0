// src/infrastructure/security/token.rs
use super::USER_MODEL_TYPE;
use crate::{
    application::{
        dto::Actor,
        error::{ApplicationError, ApplicationResult},
        ports::authentication::ActorResolver,
    },
    domain::user::UserId,
};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{FromRow, PgPool};

/// Splits `<id>|<secret>` into its parts; the id must be a positive integer.
pub(crate) fn split_token(token: &str) -> Option<(i64, &str)> {
    let (id, secret) = token.split_once('|')?;
    let id: i64 = id.parse().ok()?;
    if id <= 0 || secret.is_empty() {
        return None;
    }
    Some((id, secret))
}

/// Lowercase hex SHA-256, the stored form of a token secret.
pub fn hash_secret(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}

#[derive(Debug, FromRow)]
struct TokenOwner {
    user_id: i64,
    name: String,
}

/// Resolves personal access tokens stored as SHA-256 hashes.
#[derive(Clone)]
pub struct PostgresTokenResolver {
    pool: PgPool,
}

impl PostgresTokenResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorResolver for PostgresTokenResolver {
    async fn resolve(&self, token: &str) -> ApplicationResult<Option<Actor>> {
        let Some((token_id, secret)) = split_token(token) else {
            return Ok(None);
        };

        let owner = sqlx::query_as::<_, TokenOwner>(
            "UPDATE personal_access_tokens t
             SET last_used_at = NOW()
             FROM users u
             WHERE t.id = $1
               AND t.token = $2
               AND t.tokenable_type = $3
               AND u.id = t.tokenable_id
               AND (t.expires_at IS NULL OR t.expires_at > NOW())
             RETURNING u.id AS user_id, u.name",
        )
        .bind(token_id)
        .bind(hash_secret(secret))
        .bind(USER_MODEL_TYPE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        match owner {
            Some(owner) => Ok(Some(Actor::new(UserId::new(owner.user_id)?, owner.name))),
            None => Ok(None),
        }
    }
}
