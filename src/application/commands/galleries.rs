// src/application/commands/galleries.rs
use super::records::{CreateInput, ManagedRecord, UpdateInput, WriteContext};
use crate::{
    application::dto::{GalleryDto, patch::nullable},
    domain::{
        errors::FieldErrors,
        gallery::{Gallery, NewGallery},
        values::{Description, ImagePath, Name},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateGalleryCommand {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Stored image path or URL.
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateGalleryCommand {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub image: Option<String>,
}

impl CreateInput<Gallery> for CreateGalleryCommand {
    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewGallery, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.capture("title", Name::new(self.title));
        let description = errors.capture("description", Description::optional(self.description));
        let image = errors.capture("image", ImagePath::new(self.image));

        match (title, description, image) {
            (Some(title), Some(description), Some(image)) => Ok(NewGallery {
                title,
                description,
                image,
                created_at: ctx.now,
                updated_at: ctx.now,
            }),
            _ => Err(errors),
        }
    }
}

impl UpdateInput<Gallery> for UpdateGalleryCommand {
    fn apply(self, record: &mut Gallery, _ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.capture_some("title", self.title.map(Name::new));
        let description =
            errors.capture_some("description", self.description.map(Description::optional));
        let image = errors.capture_some("image", self.image.map(ImagePath::new));
        errors.into_result()?;

        if let Some(title) = title {
            record.title = title;
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

impl ManagedRecord for Gallery {
    type Dto = GalleryDto;
    type Create = CreateGalleryCommand;
    type Update = UpdateGalleryCommand;
}
