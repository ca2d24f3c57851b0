use super::create::tag_ids;
use crate::{
    application::{
        commands::records::{UpdateInput, WriteContext},
        dto::patch::nullable,
    },
    domain::{
        article::Article,
        category::CategoryId,
        errors::FieldErrors,
        record::Action,
        values::{Body, Excerpt, ImagePath, Name},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateArticleCommand {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub excerpt: Option<Option<String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Replaces the whole tag set when present; `[]` detaches every tag.
    #[serde(default)]
    pub tag_ids: Option<Vec<i64>>,
    /// Requires the `publish artikel` permission when present.
    #[serde(default)]
    pub published: Option<bool>,
}

impl UpdateInput<Article> for UpdateArticleCommand {
    fn extra_permission(&self) -> Option<Action> {
        self.published.map(|_| Action::Publish)
    }

    fn apply(self, record: &mut Article, ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.capture_some("title", self.title.map(Name::new));
        let slug = ctx.update_slug(
            &mut errors,
            record.title.as_str(),
            title.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        let excerpt = errors.capture_some("excerpt", self.excerpt.map(Excerpt::optional));
        let body = errors.capture_some("body", self.body.map(Body::new));
        let image = errors.capture_some("image", self.image.map(ImagePath::optional));
        let category_id =
            errors.capture_some("category_id", self.category_id.map(CategoryId::new));
        let tags = self.tag_ids.and_then(|ids| tag_ids(&mut errors, ids));
        errors.into_result()?;

        if let Some(title) = title {
            record.title = title;
        }
        if let Some(slug) = slug {
            record.slug = slug;
        }
        if let Some(excerpt) = excerpt {
            record.excerpt = excerpt;
        }
        if let Some(body) = body {
            record.body = body;
        }
        if let Some(image) = image {
            record.image = image;
        }
        if let Some(category_id) = category_id {
            record.category_id = category_id;
        }
        if let Some(tags) = tags {
            record.replace_tags(tags);
        }
        match self.published {
            Some(true) if !record.published => record.publish(ctx.now),
            Some(false) if record.published => record.unpublish(ctx.now),
            _ => {}
        }
        Ok(())
    }
}
