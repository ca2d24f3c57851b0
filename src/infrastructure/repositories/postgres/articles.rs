// src/infrastructure/repositories/postgres/articles.rs
use super::{PgRecord, PostgresRecordRepository, map_sqlx};
use crate::domain::{
    article::{Article, ArticleFilter, ArticleId, ArticleViewCounter, NewArticle},
    category::CategoryId,
    errors::DomainResult,
    slug::Slug,
    tag::TagId,
    user::UserId,
    values::{Body, Excerpt, ImagePath, Name},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

#[derive(Debug, FromRow)]
pub struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    excerpt: Option<String>,
    body: String,
    image: Option<String>,
    category_id: i64,
    author_id: i64,
    tag_ids: Vec<i64>,
    published: bool,
    published_at: Option<DateTime<Utc>>,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

async fn replace_tags(conn: &mut PgConnection, article_id: i64, tag_ids: &[TagId]) -> DomainResult<()> {
    sqlx::query("DELETE FROM article_tag WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = tag_ids.iter().map(|tag| tag.0).collect();
    sqlx::query(
        "INSERT INTO article_tag (article_id, tag_id)
         SELECT $1, UNNEST($2::BIGINT[])
         ON CONFLICT DO NOTHING",
    )
    .bind(article_id)
    .bind(ids)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl PgRecord for Article {
    const TABLE: &'static str = "articles";
    const COLUMNS: &'static str = "id, title, slug, excerpt, body, image, category_id, author_id, \
        published, published_at, views, created_at, updated_at, deleted_at, \
        ARRAY(SELECT t.tag_id FROM article_tag t \
              WHERE t.article_id = articles.id ORDER BY t.tag_id) AS tag_ids";

    type Row = ArticleRow;

    fn from_row(row: ArticleRow) -> DomainResult<Self> {
        let tag_ids = row
            .tag_ids
            .into_iter()
            .map(TagId::new)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: Name::new(row.title)?,
            slug: Slug::new(row.slug)?,
            excerpt: Excerpt::optional(row.excerpt)?,
            body: Body::new(row.body)?,
            image: ImagePath::optional(row.image)?,
            category_id: CategoryId::new(row.category_id)?,
            author_id: UserId::new(row.author_id)?,
            tag_ids,
            published: row.published,
            published_at: row.published_at,
            views: row.views,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
        if let Some(published) = filter.published {
            builder.push(" AND published = ");
            builder.push_bind(published);
        }
        if let Some(category_id) = filter.category_id {
            builder.push(" AND category_id = ");
            builder.push_bind(category_id);
        }
        if let Some(tag_id) = filter.tag_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM article_tag t WHERE t.article_id = articles.id AND t.tag_id = ",
            );
            builder.push_bind(tag_id);
            builder.push(")");
        }
    }

    async fn insert_row(conn: &mut PgConnection, new: NewArticle) -> DomainResult<i64> {
        let published_at = if new.published { new.published_at } else { None };
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO articles
                 (title, slug, excerpt, body, image, category_id, author_id,
                  published, published_at, views, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, $11)
             RETURNING id",
        )
        .bind(new.title.into_inner())
        .bind(new.slug.into_inner())
        .bind(new.excerpt.map(Excerpt::into_inner))
        .bind(new.body.into_inner())
        .bind(new.image.map(ImagePath::into_inner))
        .bind(new.category_id.0)
        .bind(new.author_id.0)
        .bind(new.published)
        .bind(published_at)
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        replace_tags(conn, id, &new.tag_ids).await?;
        Ok(id)
    }

    async fn update_row(conn: &mut PgConnection, record: &Article) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE articles
             SET title = $2, slug = $3, excerpt = $4, body = $5, image = $6,
                 category_id = $7, published = $8, published_at = $9, updated_at = $10
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(record.id.0)
        .bind(record.title.as_str())
        .bind(record.slug.as_str())
        .bind(record.excerpt.as_ref().map(Excerpt::as_str))
        .bind(record.body.as_str())
        .bind(record.image.as_ref().map(ImagePath::as_str))
        .bind(record.category_id.0)
        .bind(record.published)
        .bind(record.published_at)
        .bind(record.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        replace_tags(conn, record.id.0, &record.tag_ids).await?;
        Ok(true)
    }
}

#[async_trait]
impl ArticleViewCounter for PostgresRecordRepository<Article> {
    async fn record_view(&self, id: ArticleId) -> DomainResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE articles SET views = views + 1
             WHERE id = $1 AND published AND deleted_at IS NULL
             RETURNING views",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}
