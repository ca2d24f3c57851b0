// src/infrastructure/repositories/postgres/mod.rs
//! One generic repository over every table; per-entity SQL lives in the
//! [`PgRecord`] impls next to it.
mod articles;
mod catalog;
mod listing;
mod organization;
mod taxonomy;

use super::error::{map_purge_error, map_sqlx};
use crate::application::services::Repositories;
use crate::domain::{
    article::Article,
    category::Category,
    division::{Division, SubDivision},
    errors::{DomainError, DomainResult},
    gallery::Gallery,
    listing::{ListQuery, Page, Trashed},
    product::Product,
    record::{Record, RecordRepository},
    slug::Slug,
    staff::Staff,
    tag::Tag,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder, postgres::PgRow};
use std::{marker::PhantomData, sync::Arc};

/// Table mapping of a record type.
#[async_trait]
pub trait PgRecord: Record {
    const TABLE: &'static str;
    /// Select list; may contain correlated sub-selects on `TABLE`.
    const COLUMNS: &'static str;
    const HAS_SLUG: bool = true;

    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;

    fn from_row(row: Self::Row) -> DomainResult<Self>;

    /// Appends ` AND ...` conditions for the entity's extra list filters.
    fn push_filter(_builder: &mut QueryBuilder<'_, Postgres>, _filter: &Self::Filter) {}

    /// Inserts the row and its associations, returning the new id.
    async fn insert_row(conn: &mut PgConnection, new: Self::New) -> DomainResult<i64>;

    /// Writes every mutable column of a live row; `false` when no live row
    /// has that id.
    async fn update_row(conn: &mut PgConnection, record: &Self) -> DomainResult<bool>;
}

pub struct PostgresRecordRepository<R> {
    pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R> PostgresRecordRepository<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

impl<R> Clone for PostgresRecordRepository<R> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

/// Repositories for every collection over one pool.
pub fn postgres_repositories(pool: &PgPool) -> Repositories {
    let articles = Arc::new(PostgresRecordRepository::<Article>::new(pool.clone()));
    Repositories {
        articles: articles.clone(),
        article_views: articles,
        categories: Arc::new(PostgresRecordRepository::<Category>::new(pool.clone())),
        tags: Arc::new(PostgresRecordRepository::<Tag>::new(pool.clone())),
        divisions: Arc::new(PostgresRecordRepository::<Division>::new(pool.clone())),
        sub_divisions: Arc::new(PostgresRecordRepository::<SubDivision>::new(pool.clone())),
        staff: Arc::new(PostgresRecordRepository::<Staff>::new(pool.clone())),
        products: Arc::new(PostgresRecordRepository::<Product>::new(pool.clone())),
        galleries: Arc::new(PostgresRecordRepository::<Gallery>::new(pool.clone())),
    }
}

fn trashed_condition(trashed: Trashed) -> &'static str {
    match trashed {
        Trashed::Without => "deleted_at IS NULL",
        Trashed::With => "TRUE",
        Trashed::Only => "deleted_at IS NOT NULL",
    }
}

async fn fetch<R: PgRecord>(
    conn: &mut PgConnection,
    id: i64,
    trashed: Trashed,
) -> DomainResult<Option<R>> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM {} WHERE id = ", R::COLUMNS, R::TABLE));
    builder.push_bind(id);
    builder.push(" AND ");
    builder.push(trashed_condition(trashed));

    let row = builder
        .build_query_as::<R::Row>()
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    row.map(R::from_row).transpose()
}

fn not_found<R: Record>(id: i64) -> DomainError {
    DomainError::NotFound(format!("{} {id} not found", R::RESOURCE))
}

#[async_trait]
impl<R: PgRecord> RecordRepository<R> for PostgresRecordRepository<R> {
    async fn insert(&self, new: R::New) -> DomainResult<R> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let id = R::insert_row(&mut tx, new).await?;
        let record = fetch::<R>(&mut tx, id, Trashed::With)
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(record)
    }

    async fn update(&self, record: &R) -> DomainResult<R> {
        let id = record.id();
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        if !R::update_row(&mut tx, record).await? {
            return Err(not_found::<R>(id));
        }
        let updated = fetch::<R>(&mut tx, id, Trashed::With)
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(updated)
    }

    async fn find_by_id(&self, id: i64, trashed: Trashed) -> DomainResult<Option<R>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        fetch::<R>(&mut conn, id, trashed).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<R>> {
        if !R::HAS_SLUG {
            return Ok(None);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL AND slug = ",
            R::COLUMNS,
            R::TABLE
        ));
        builder.push_bind(slug.as_str().to_owned());

        let row = builder
            .build_query_as::<R::Row>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(R::from_row).transpose()
    }

    async fn list(&self, query: &ListQuery, filter: &R::Filter) -> DomainResult<Page<R>> {
        listing::list::<R>(&self.pool, query, filter).await
    }

    async fn soft_delete(&self, id: i64, at: DateTime<Utc>) -> DomainResult<()> {
        let sql = format!(
            "UPDATE {} SET deleted_at = $2, updated_at = $2 WHERE id = $1 AND deleted_at IS NULL",
            R::TABLE
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn restore(&self, id: i64, at: DateTime<Utc>) -> DomainResult<R> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NULL, updated_at = $2 WHERE id = $1 AND deleted_at IS NOT NULL",
            R::TABLE
        );
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(not_found::<R>(id));
        }
        let restored = fetch::<R>(&mut tx, id, Trashed::Without)
            .await?
            .ok_or_else(|| not_found::<R>(id))?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(restored)
    }

    async fn purge(&self, id: i64) -> DomainResult<()> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 AND deleted_at IS NOT NULL",
            R::TABLE
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_purge_error)?;
        if result.rows_affected() == 0 {
            return Err(not_found::<R>(id));
        }
        Ok(())
    }
}
