// src/application/ports/authentication.rs
use crate::application::{dto::Actor, error::ApplicationResult};
use async_trait::async_trait;

/// Maps a bearer token onto the account behind it.
#[async_trait]
pub trait ActorResolver: Send + Sync {
    /// `Ok(None)` for unknown, malformed or expired tokens.
    async fn resolve(&self, token: &str) -> ApplicationResult<Option<Actor>>;
}
