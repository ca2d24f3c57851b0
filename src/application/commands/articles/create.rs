use crate::{
    application::commands::records::{CreateInput, WriteContext, required},
    domain::{
        article::{Article, NewArticle},
        category::CategoryId,
        errors::{DomainResult, FieldErrors},
        record::Action,
        tag::TagId,
        values::{Body, Excerpt, ImagePath, Name},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateArticleCommand {
    #[serde(default)]
    pub title: String,
    /// Derived from `title` when absent or blank.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    /// Requires the `publish artikel` permission when true.
    #[serde(default)]
    pub published: bool,
}

pub(super) fn tag_ids(errors: &mut FieldErrors, ids: Vec<i64>) -> Option<Vec<TagId>> {
    let parsed: DomainResult<Vec<TagId>> = ids.into_iter().map(TagId::new).collect();
    errors.capture("tag_ids", parsed)
}

impl CreateInput<Article> for CreateArticleCommand {
    fn extra_permission(&self) -> Option<Action> {
        self.published.then_some(Action::Publish)
    }

    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewArticle, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.capture("title", Name::new(self.title));
        let slug = ctx.create_slug(
            &mut errors,
            title.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        let excerpt = errors.capture("excerpt", Excerpt::optional(self.excerpt));
        let body = errors.capture("body", Body::new(self.body));
        let image = errors.capture("image", ImagePath::optional(self.image));
        let category_id = required(
            &mut errors,
            "category_id",
            self.category_id.map(CategoryId::new),
        );
        let tags = tag_ids(&mut errors, self.tag_ids);

        match (title, slug, excerpt, body, image, category_id, tags) {
            (
                Some(title),
                Some(slug),
                Some(excerpt),
                Some(body),
                Some(image),
                Some(category_id),
                Some(tag_ids),
            ) if errors.is_empty() => Ok(NewArticle {
                title,
                slug,
                excerpt,
                body,
                image,
                category_id,
                author_id: ctx.actor.id,
                tag_ids,
                published: self.published,
                published_at: self.published.then_some(ctx.now),
                created_at: ctx.now,
                updated_at: ctx.now,
            }),
            _ => Err(errors),
        }
    }
}
