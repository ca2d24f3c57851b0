// src/application/commands/tags.rs
use super::records::{CreateInput, ManagedRecord, UpdateInput, WriteContext};
use crate::{
    application::dto::TagDto,
    domain::{
        errors::FieldErrors,
        tag::{NewTag, Tag},
        values::Name,
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTagCommand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTagCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl CreateInput<Tag> for CreateTagCommand {
    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewTag, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.capture("name", Name::new(self.name));
        let slug = ctx.create_slug(
            &mut errors,
            name.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );

        match (name, slug) {
            (Some(name), Some(slug)) if errors.is_empty() => Ok(NewTag {
                name,
                slug,
                created_at: ctx.now,
                updated_at: ctx.now,
            }),
            _ => Err(errors),
        }
    }
}

impl UpdateInput<Tag> for UpdateTagCommand {
    fn apply(self, record: &mut Tag, ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.capture_some("name", self.name.map(Name::new));
        let slug = ctx.update_slug(
            &mut errors,
            record.name.as_str(),
            name.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        errors.into_result()?;

        if let Some(name) = name {
            record.name = name;
        }
        if let Some(slug) = slug {
            record.slug = slug;
        }
        Ok(())
    }
}

impl ManagedRecord for Tag {
    type Dto = TagDto;
    type Create = CreateTagCommand;
    type Update = UpdateTagCommand;
}
