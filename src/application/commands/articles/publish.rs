use super::ArticleCommandService;
use crate::{
    application::{
        dto::{Actor, ArticleDto},
        error::ApplicationResult,
    },
    domain::{listing::Trashed, record::Action},
};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct SetPublishStateCommand {
    pub publish: bool,
}

impl ArticleCommandService {
    /// Publishing stamps `published_at`; unpublishing clears it. Asking for
    /// the current state changes nothing.
    pub async fn set_publish_state(
        &self,
        actor: &Actor,
        id: i64,
        command: SetPublishStateCommand,
    ) -> ApplicationResult<ArticleDto> {
        self.ensure(actor, Action::Publish).await?;
        let mut article = self.load(id, Trashed::Without).await?;
        if article.published == command.publish {
            return Ok(article.into());
        }

        let now = self.clock.now();
        if command.publish {
            article.publish(now);
        } else {
            article.unpublish(now);
        }

        let updated = self.repo.update(&article).await?;
        info!(id, actor = %actor.id, published = command.publish, "article publish state changed");
        Ok(updated.into())
    }
}
