// src/application/ports/authorization.rs
use crate::{
    application::{
        dto::Actor,
        error::{ApplicationError, ApplicationResult},
    },
    domain::record::{Action, Resource, permission},
};
use async_trait::async_trait;

#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Whether `actor` holds `permission` (e.g. `edit kategori`).
    async fn can(&self, actor: &Actor, permission: &str) -> ApplicationResult<bool>;

    async fn ensure(&self, actor: &Actor, action: Action, resource: Resource) -> ApplicationResult<()> {
        let name = permission(action, resource);
        if self.can(actor, &name).await? {
            Ok(())
        } else {
            Err(ApplicationError::forbidden(format!("missing permission {name}")))
        }
    }
}
