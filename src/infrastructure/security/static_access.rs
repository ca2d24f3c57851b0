// src/infrastructure/security/static_access.rs
//! Fixed token and permission tables for the in-memory backend.
use crate::{
    application::{
        dto::Actor, error::ApplicationResult, ports::authentication::ActorResolver,
        ports::authorization::Authorizer,
    },
    domain::user::UserId,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
enum Grant {
    Everything,
    Only(HashSet<String>),
}

#[derive(Debug, Clone, Default)]
pub struct StaticAuthorizer {
    grants: HashMap<UserId, Grant>,
}

impl StaticAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn super_admin(mut self, user: UserId) -> Self {
        self.grants.insert(user, Grant::Everything);
        self
    }

    pub fn grant<I, S>(mut self, user: UserId, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .grants
            .entry(user)
            .or_insert_with(|| Grant::Only(HashSet::new()));
        if let Grant::Only(set) = entry {
            set.extend(permissions.into_iter().map(Into::into));
        }
        self
    }
}

#[async_trait]
impl Authorizer for StaticAuthorizer {
    async fn can(&self, actor: &Actor, permission: &str) -> ApplicationResult<bool> {
        Ok(match self.grants.get(&actor.id) {
            Some(Grant::Everything) => true,
            Some(Grant::Only(set)) => set.contains(permission),
            None => false,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, Actor>,
}

impl StaticTokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, actor: Actor) -> Self {
        self.tokens.insert(token.into(), actor);
        self
    }
}

#[async_trait]
impl ActorResolver for StaticTokenResolver {
    async fn resolve(&self, token: &str) -> ApplicationResult<Option<Actor>> {
        Ok(self.tokens.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn grants_are_per_user() {
        let admin = Actor::new(UserId(1), "admin");
        let editor = Actor::new(UserId(2), "editor");
        let stranger = Actor::new(UserId(3), "stranger");
        let authorizer = StaticAuthorizer::new()
            .super_admin(admin.id)
            .grant(editor.id, ["view artikel", "edit artikel"]);

        assert!(authorizer.can(&admin, "delete produk").await.unwrap());
        assert!(authorizer.can(&editor, "edit artikel").await.unwrap());
        assert!(!authorizer.can(&editor, "publish artikel").await.unwrap());
        assert!(!authorizer.can(&stranger, "view artikel").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_tokens_resolve_to_none() {
        let resolver = StaticTokenResolver::new().with_token("dev", Actor::new(UserId(1), "dev"));
        assert!(resolver.resolve("dev").await.unwrap().is_some());
        assert!(resolver.resolve("other").await.unwrap().is_none());
    }
}
