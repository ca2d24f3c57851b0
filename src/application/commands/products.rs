// src/application/commands/products.rs
use super::records::{CreateInput, ManagedRecord, UpdateInput, WriteContext};
use crate::{
    application::dto::{ProductDto, patch::nullable},
    domain::{
        errors::FieldErrors,
        product::{NewProduct, Product},
        values::{Description, ImagePath, Name, Price},
    },
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateProductCommand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Whole rupiah; omit for "price on request".
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProductCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i64>)]
    pub price: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

impl CreateInput<Product> for CreateProductCommand {
    fn into_new(self, ctx: &WriteContext<'_>) -> Result<NewProduct, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.capture("name", Name::new(self.name));
        let slug = ctx.create_slug(
            &mut errors,
            name.as_ref().map(Name::as_str),
            self.slug.as_deref(),
        );
        let description = errors.capture("description", Description::optional(self.description));
        let price = errors.capture("price", self.price.map(Price::new).transpose());
        let image = errors.capture("image", ImagePath::optional(self.image));

        match (name, slug, description, price, image) {
            (Some(name), Some(slug), Some(description), Some(price), Some(image))
                if errors.is_empty() =>
            {
                Ok(NewProduct {
                    name,
                    slug,
                    description,
                    price,
                    image,
                    created_at: ctx.now,
                    updated_at: ctx.now,
                })
            }
            _ => Err(errors),
        }
    }
}

impl UpdateInput<Product> for UpdateProductCommand {
    fn apply(self, record: &mut Product, ctx: &WriteContext<'_>) -> Result<(), FieldErrors> {
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
        let price = errors.capture_some(
            "price",
            self.price.map(|price| price.map(Price::new).transpose()),
        );
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
        if let Some(price) = price {
            record.price = price;
        }
        if let Some(image) = image {
            record.image = image;
        }
        Ok(())
    }
}

impl ManagedRecord for Product {
    type Dto = ProductDto;
    type Create = CreateProductCommand;
    type Update = UpdateProductCommand;
}
