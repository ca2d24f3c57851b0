// src/application/commands/records/service.rs
use std::sync::Arc;

use super::input::{CreateInput, ManagedRecord, UpdateInput, WriteContext};
use crate::{
    application::{
        dto::Actor,
        error::{ApplicationError, ApplicationResult},
        ports::{authorization::Authorizer, time::Clock, util::SlugGenerator},
    },
    domain::{
        listing::Trashed,
        record::{Action, Record, RecordRepository},
        slug::SlugPolicy,
    },
};
use tracing::info;

/// Admin write path shared by every managed collection.
pub struct RecordCommandService<R: Record> {
    pub(crate) repo: Arc<dyn RecordRepository<R>>,
    pub(crate) authorizer: Arc<dyn Authorizer>,
    pub(crate) clock: Arc<dyn Clock>,
    slugger: Arc<dyn SlugGenerator>,
}

impl<R: ManagedRecord> RecordCommandService<R> {
    pub fn new(
        repo: Arc<dyn RecordRepository<R>>,
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            repo,
            authorizer,
            clock,
            slugger,
        }
    }

    pub(crate) async fn ensure(&self, actor: &Actor, action: Action) -> ApplicationResult<()> {
        self.authorizer.ensure(actor, action, R::RESOURCE).await
    }

    pub(crate) async fn load(&self, id: i64, trashed: Trashed) -> ApplicationResult<R> {
        self.repo
            .find_by_id(id, trashed)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} {id} not found", R::RESOURCE)))
    }

    fn context<'a>(&'a self, actor: &'a Actor) -> WriteContext<'a> {
        WriteContext {
            now: self.clock.now(),
            slugs: SlugPolicy::new(self.slugger.as_ref()),
            actor,
        }
    }

    pub async fn create(&self, actor: &Actor, input: R::Create) -> ApplicationResult<R::Dto> {
        self.ensure(actor, Action::Create).await?;
        if let Some(extra) = input.extra_permission() {
            self.ensure(actor, extra).await?;
        }

        let new = input.into_new(&self.context(actor))?;
        let created = self.repo.insert(new).await?;
        info!(resource = %R::RESOURCE, id = created.id(), actor = %actor.id, "record created");
        Ok(created.into())
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: i64,
        input: R::Update,
    ) -> ApplicationResult<R::Dto> {
        self.ensure(actor, Action::Edit).await?;
        if let Some(extra) = input.extra_permission() {
            self.ensure(actor, extra).await?;
        }

        let mut record = self.load(id, Trashed::Without).await?;
        let now = {
            let ctx = self.context(actor);
            input.apply(&mut record, &ctx)?;
            ctx.now
        };
        record.touch(now);

        let updated = self.repo.update(&record).await?;
        info!(resource = %R::RESOURCE, id, actor = %actor.id, "record updated");
        Ok(updated.into())
    }

    /// Soft delete. Deleting a record that is already trashed succeeds
    /// without touching it.
    pub async fn delete(&self, actor: &Actor, id: i64) -> ApplicationResult<()> {
        self.ensure(actor, Action::Delete).await?;
        let record = self.load(id, Trashed::With).await?;
        if record.deleted_at().is_some() {
            return Ok(());
        }

        self.repo.soft_delete(id, self.clock.now()).await?;
        info!(resource = %R::RESOURCE, id, actor = %actor.id, "record moved to trash");
        Ok(())
    }

    /// Brings a trashed record back; a live record is returned unchanged.
    pub async fn restore(&self, actor: &Actor, id: i64) -> ApplicationResult<R::Dto> {
        self.ensure(actor, Action::Restore).await?;
        let record = self.load(id, Trashed::With).await?;
        if record.deleted_at().is_none() {
            return Ok(record.into());
        }

        let restored = self.repo.restore(id, self.clock.now()).await?;
        info!(resource = %R::RESOURCE, id, actor = %actor.id, "record restored");
        Ok(restored.into())
    }

    /// Permanently removes a record that is already in the trash.
    pub async fn force_delete(&self, actor: &Actor, id: i64) -> ApplicationResult<()> {
        self.ensure(actor, Action::Delete).await?;
        self.load(id, Trashed::Only).await?;
        self.repo.purge(id).await?;
        info!(resource = %R::RESOURCE, id, actor = %actor.id, "record purged");
        Ok(())
    }
}
