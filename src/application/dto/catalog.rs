use crate::domain::{gallery::Gallery, product::Product};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Whole rupiah.
    pub price: Option<i64>,
    pub image: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            name: product.name.into_inner(),
            slug: product.slug.into_inner(),
            description: product.description.map(|d| d.into_inner()),
            price: product.price.map(|p| p.value()),
            image: product.image.map(|i| i.into_inner()),
            created_at: product.created_at,
            updated_at: product.updated_at,
            deleted_at: product.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GalleryDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "serde_time::option", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Gallery> for GalleryDto {
    fn from(gallery: Gallery) -> Self {
        Self {
            id: gallery.id.into(),
            title: gallery.title.into_inner(),
            description: gallery.description.map(|d| d.into_inner()),
            image: gallery.image.into_inner(),
            created_at: gallery.created_at,
            updated_at: gallery.updated_at,
            deleted_at: gallery.deleted_at,
        }
    }
}
