// src/application/commands/divisions.rs
use super::records::{CreateInput, ManagedRecord, UpdateInput, WriteContext, required};
use crate::{
    application::dto::{DivisionDto, SubDivisionDto, patch::nullable},
    domain::{
        division::{Division, DivisionId, NewDivision, NewSubDivision, SubDivision},
        errors::FieldErrors,
        values::{Description, ImagePath, Name},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateDivisionCommand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateDivisionCommand {
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

impl CreateInput<Division> for CreateDivisionCommand {
    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewDivision, FieldErrors> {
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
                Ok(NewDivision {
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

impl UpdateInput<Division> for UpdateDivisionCommand {
    fn apply(self, record: &mut Division, ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
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

impl ManagedRecord for Division {
    type Dto = DivisionDto;
    type Create = CreateDivisionCommand;
    type Update = UpdateDivisionCommand;
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateSubDivisionCommand {
    #[serde(default)]
    pub division_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSubDivisionCommand {
    #[serde(default)]
    pub division_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl CreateInput<SubDivision> for CreateSubDivisionCommand {
    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewSubDivision, FieldErrors> {
        let mut errors = FieldErrors::new();
        let division_id = required(
            &mut errors,
            "division_id",
            self.division_id.map(DivisionId::new),
        );
        let name = errors.capture("name", Name::new(self.name));
        let slug = ctx.create_slug(
            &mut errors,
            name.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        let description = errors.capture("description", Description::optional(self.description));

        match (division_id, name, slug, description) {
            (Some(division_id), Some(name), Some(slug), Some(description))
                if errors.is_empty() =>
            {
                Ok(NewSubDivision {
                    division_id,
                    name,
                    slug,
                    description,
                    created_at: ctx.now,
                    updated_at: ctx.now,
                })
            }
            _ => Err(errors),
        }
    }
}

impl UpdateInput<SubDivision> for UpdateSubDivisionCommand {
    fn apply(self, record: &mut SubDivision, ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let division_id =
            errors.capture_some("division_id", self.division_id.map(DivisionId::new));
        let name = errors.capture_some("name", self.name.map(Name::new));
        let slug = ctx.update_slug(
            &mut errors,
            record.name.as_str(),
            name.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        let description =
            errors.capture_some("description", self.description.map(Description::optional));
        errors.into_result()?;

        if let Some(division_id) = division_id {
            record.division_id = division_id;
        }
        if let Some(name) = name {
            record.name = name;
        }
        if let Some(slug) = slug {
            record.slug = slug;
        }
        if let Some(description) = description {
            record.description = description;
        }
        Ok(())
    }
}

impl ManagedRecord for SubDivision {
    type Dto = SubDivisionDto;
    type Create = CreateSubDivisionCommand;
    type Update = UpdateSubDivisionCommand;
}
