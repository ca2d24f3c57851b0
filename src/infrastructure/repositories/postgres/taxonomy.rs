// src/infrastructure/repositories/postgres/taxonomy.rs
use super::{PgRecord, map_sqlx};
use crate::domain::{
    category::{Category, CategoryId, NewCategory},
    errors::DomainResult,
    slug::Slug,
    tag::{NewTag, Tag, TagId},
    values::{Description, ImagePath, Name},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};

#[derive(Debug, FromRow)]
pub struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl PgRecord for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str =
        "id, name, slug, description, image, created_at, updated_at, deleted_at";

    type Row = CategoryRow;

    fn from_row(row: CategoryRow) -> DomainResult<Self> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: Name::new(row.name)?,
            slug: Slug::new(row.slug)?,
            description: Description::optional(row.description)?,
            image: ImagePath::optional(row.image)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    async fn insert_row(conn: &mut PgConnection, new: NewCategory) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO categories (name, slug, description, image, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(new.name.into_inner())
        .bind(new.slug.into_inner())
        .bind(new.description.map(Description::into_inner))
        .bind(new.image.map(ImagePath::into_inner))
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)
    }

    async fn update_row(conn: &mut PgConnection, record: &Category) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE categories
             SET name = $2, slug = $3, description = $4, image = $5, updated_at = $6
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(record.id.0)
        .bind(record.name.as_str())
        .bind(record.slug.as_str())
        .bind(record.description.as_ref().map(Description::as_str))
        .bind(record.image.as_ref().map(ImagePath::as_str))
        .bind(record.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
pub struct TagRow {
    id: i64,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl PgRecord for Tag {
    const TABLE: &'static str = "tags";
    const COLUMNS: &'static str = "id, name, slug, created_at, updated_at, deleted_at";

    type Row = TagRow;

    fn from_row(row: TagRow) -> DomainResult<Self> {
        Ok(Tag {
            id: TagId::new(row.id)?,
            name: Name::new(row.name)?,
            slug: Slug::new(row.slug)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    async fn insert_row(conn: &mut PgConnection, new: NewTag) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO tags (name, slug, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(new.name.into_inner())
        .bind(new.slug.into_inner())
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)
    }

    async fn update_row(conn: &mut PgConnection, record: &Tag) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE tags SET name = $2, slug = $3, updated_at = $4
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(record.id.0)
        .bind(record.name.as_str())
        .bind(record.slug.as_str())
        .bind(record.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
