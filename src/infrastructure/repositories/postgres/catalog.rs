// src/infrastructure/repositories/postgres/catalog.rs
use super::{PgRecord, map_sqlx};
use crate::domain::{
    errors::DomainResult,
    gallery::{Gallery, GalleryId, NewGallery},
    product::{NewProduct, Product, ProductId},
    slug::Slug,
    values::{Description, ImagePath, Name, Price},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};

#[derive(Debug, FromRow)]
pub struct ProductRow {
    id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    price: Option<i64>,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl PgRecord for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static str =
        "id, name, slug, description, price, image, created_at, updated_at, deleted_at";

    type Row = ProductRow;

    fn from_row(row: ProductRow) -> DomainResult<Self> {
        Ok(Product {
            id: ProductId::new(row.id)?,
            name: Name::new(row.name)?,
            slug: Slug::new(row.slug)?,
            description: Description::optional(row.description)?,
            price: row.price.map(Price::new).transpose()?,
            image: ImagePath::optional(row.image)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    async fn insert_row(conn: &mut PgConnection, new: NewProduct) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO products (name, slug, description, price, image, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(new.name.into_inner())
        .bind(new.slug.into_inner())
        .bind(new.description.map(Description::into_inner))
        .bind(new.price.map(Price::value))
        .bind(new.image.map(ImagePath::into_inner))
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)
    }

    async fn update_row(conn: &mut PgConnection, record: &Product) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE products
             SET name = $2, slug = $3, description = $4, price = $5, image = $6, updated_at = $7
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(record.id.0)
        .bind(record.name.as_str())
        .bind(record.slug.as_str())
        .bind(record.description.as_ref().map(Description::as_str))
        .bind(record.price.map(Price::value))
        .bind(record.image.as_ref().map(ImagePath::as_str))
        .bind(record.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
pub struct GalleryRow {
    id: i64,
    title: String,
    description: Option<String>,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl PgRecord for Gallery {
    const TABLE: &'static str = "galleries";
    const COLUMNS: &'static str =
        "id, title, description, image, created_at, updated_at, deleted_at";
    const HAS_SLUG: bool = false;

    type Row = GalleryRow;

    fn from_row(row: GalleryRow) -> DomainResult<Self> {
        Ok(Gallery {
            id: GalleryId::new(row.id)?,
            title: Name::new(row.title)?,
            description: Description::optional(row.description)?,
            image: ImagePath::new(row.image)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    async fn insert_row(conn: &mut PgConnection, new: NewGallery) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO galleries (title, description, image, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(new.title.into_inner())
        .bind(new.description.map(Description::into_inner))
        .bind(new.image.into_inner())
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)
    }

    async fn update_row(conn: &mut PgConnection, record: &Gallery) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE galleries
             SET title = $2, description = $3, image = $4, updated_at = $5
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(record.id.0)
        .bind(record.title.as_str())
        .bind(record.description.as_ref().map(Description::as_str))
        .bind(record.image.as_str())
        .bind(record.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
