// src/domain/article/repository.rs
use crate::domain::article::entity::ArticleId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleViewCounter: Send + Sync {
    /// Atomically bumps the view counter of a live, published article and
    /// returns the new count; `None` when no such article exists.
    async fn record_view(&self, id: ArticleId) -> DomainResult<Option<i64>>;
}
