// src/application/commands/categories.rs
use super::records::{CreateInput, ManagedRecord, UpdateInput, WriteContext};
use crate::{
    application::dto::{CategoryDto, patch::nullable},
    domain::{
        category::{Category, NewCategory},
        errors::FieldErrors,
        values::{Description, ImagePath, Name},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateCategoryCommand {
    #[serde(default)]
    pub name: String,
    /// Derived from `name` when absent or blank.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

impl CreateInput<Category> for CreateCategoryCommand {
    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewCategory, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.capture("name", Name::new(self.name));
        let slug = ctx.create_slug(
            &mut errors,
            name.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        let description = errors.capture("description", Description::optional(self.description));
        let image = errors.capture("image", ImagePath::optional(self.image));

        match (name, slug, description, image) {
            (Some(name), Some(slug), Some(description), Some(image)) if errors.is_empty() => {
                Ok(NewCategory {
                    name,
                    slug,
                    description,
                    image,
                    created_at: ctx.now,
                    updated_at: ctx.now,
                })
            }
            _ => Err(errors),
        }
    }
}

impl UpdateInput<Category> for UpdateCategoryCommand {
    fn apply(self, record: &mut Category, ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.capture_some("name", self.name.map(Name::new));
        let slug = ctx.update_slug(
            &mut errors,
            record.name.as_str(),
            name.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        let description =
            errors.capture_some("description", self.description.map(Description::optional));
        let image = errors.capture_some("image", self.image.map(ImagePath::optional));
        errors.into_result()?;

        if let Some(name) = name {
            record.name = name;
        }
        if let Some(slug) = slug {
            record.slug = slug;
        }
        if let Some(description) = description {
            record.description = description;
        }
        if let Some(image) = image {
            record.image = image;
        }
        Ok(())
    }
}

impl ManagedRecord for Category {
    type Dto = CategoryDto;
    type Create = CreateCategoryCommand;
    type Update = UpdateCategoryCommand;
}
