// src/application/queries/records.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::ManagedRecord,
        dto::{Actor, ListResponse},
        error::{ApplicationError, ApplicationResult},
        ports::authorization::Authorizer,
    },
    domain::{
        listing::{ListParams, ListQuery, SortState, Trashed},
        record::{Action, Record, RecordRepository},
    },
};

/// Read side of one managed collection, for the admin screens and the
/// public site.
pub struct RecordQueryService<R: Record> {
    repo: Arc<dyn RecordRepository<R>>,
    authorizer: Arc<dyn Authorizer>,
    default_per_page: u32,
}

impl<R: ManagedRecord> RecordQueryService<R> {
    pub fn new(
        repo: Arc<dyn RecordRepository<R>>,
        authorizer: Arc<dyn Authorizer>,
        default_per_page: u32,
    ) -> Self {
        Self {
            repo,
            authorizer,
            default_per_page,
        }
    }

    /// Requires `view <resource>`, plus `restore <resource>` for any view
    /// that includes trashed records.
    async fn ensure_can_view(&self, actor: &Actor, trashed: Trashed) -> ApplicationResult<()> {
        self.authorizer.ensure(actor, Action::View, R::RESOURCE).await?;
        if trashed != Trashed::Without {
            self.authorizer
                .ensure(actor, Action::Restore, R::RESOURCE)
                .await?;
        }
        Ok(())
    }

    pub fn normalize(&self, params: &ListParams) -> ListQuery {
        R::LIST.normalize(params, self.default_per_page)
    }

    pub async fn list(
        &self,
        actor: &Actor,
        params: &ListParams,
        filter: &R::Filter,
    ) -> ApplicationResult<ListResponse<R::Dto>> {
        let query = self.normalize(params);
        self.ensure_can_view(actor, query.trashed).await?;
        self.run(&query, filter).await
    }

    /// Live records only, whatever `trashed` says.
    pub async fn list_public(
        &self,
        params: &ListParams,
        filter: &R::Filter,
    ) -> ApplicationResult<ListResponse<R::Dto>> {
        let query = ListQuery {
            trashed: Trashed::Without,
            ..self.normalize(params)
        };
        self.run(&query, filter).await
    }

    async fn run(
        &self,
        query: &ListQuery,
        filter: &R::Filter,
    ) -> ApplicationResult<ListResponse<R::Dto>> {
        let page = self.repo.list(query, filter).await?;
        Ok(ListResponse::from_page(page, query.sort.map(SortState::from)))
    }

    pub async fn get(&self, actor: &Actor, id: i64, trashed: Trashed) -> ApplicationResult<R::Dto> {
        self.ensure_can_view(actor, trashed).await?;
        self.repo
            .find_by_id(id, trashed)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("{} {id} not found", R::RESOURCE)))
    }
}
