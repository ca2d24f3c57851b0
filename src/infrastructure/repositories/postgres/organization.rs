// src/infrastructure/repositories/postgres/organization.rs
use super::{PgRecord, map_sqlx};
use crate::domain::{
    division::{
        Division, DivisionFilter, DivisionId, NewDivision, NewSubDivision, SubDivision,
        SubDivisionId,
    },
    errors::DomainResult,
    slug::Slug,
    staff::{NewStaff, SocialLink, Staff, StaffId},
    values::{Description, ImagePath, Name, Position},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

fn push_division_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &DivisionFilter) {
    if let Some(division_id) = filter.division_id {
        builder.push(" AND division_id = ");
        builder.push_bind(division_id);
    }
}

#[derive(Debug, FromRow)]
pub struct DivisionRow {
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
impl PgRecord for Division {
    const TABLE: &'static str = "divisions";
    const COLUMNS: &'static str =
        "id, name, slug, description, image, created_at, updated_at, deleted_at";

    type Row = DivisionRow;

    fn from_row(row: DivisionRow) -> DomainResult<Self> {
        Ok(Division {
            id: DivisionId::new(row.id)?,
            name: Name::new(row.name)?,
            slug: Slug::new(row.slug)?,
            description: Description::optional(row.description)?,
            image: ImagePath::optional(row.image)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    async fn insert_row(conn: &mut PgConnection, new: NewDivision) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO divisions (name, slug, description, image, created_at, updated_at)
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

    async fn update_row(conn: &mut PgConnection, record: &Division) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE divisions
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
pub struct SubDivisionRow {
    id: i64,
    division_id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl PgRecord for SubDivision {
    const TABLE: &'static str = "sub_divisions";
    const COLUMNS: &'static str =
        "id, division_id, name, slug, description, created_at, updated_at, deleted_at";

    type Row = SubDivisionRow;

    fn from_row(row: SubDivisionRow) -> DomainResult<Self> {
        Ok(SubDivision {
            id: SubDivisionId::new(row.id)?,
            division_id: DivisionId::new(row.division_id)?,
            name: Name::new(row.name)?,
            slug: Slug::new(row.slug)?,
            description: Description::optional(row.description)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &DivisionFilter) {
        push_division_filter(builder, filter);
    }

    async fn insert_row(conn: &mut PgConnection, new: NewSubDivision) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO sub_divisions (division_id, name, slug, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(new.division_id.0)
        .bind(new.name.into_inner())
        .bind(new.slug.into_inner())
        .bind(new.description.map(Description::into_inner))
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)
    }

    async fn update_row(conn: &mut PgConnection, record: &SubDivision) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE sub_divisions
             SET division_id = $2, name = $3, slug = $4, description = $5, updated_at = $6
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(record.id.0)
        .bind(record.division_id.0)
        .bind(record.name.as_str())
        .bind(record.slug.as_str())
        .bind(record.description.as_ref().map(Description::as_str))
        .bind(record.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromRow)]
pub struct StaffRow {
    id: i64,
    name: String,
    position: String,
    division_id: i64,
    sub_division_id: Option<i64>,
    image: Option<String>,
    sort_order: i32,
    social_platforms: Vec<String>,
    social_urls: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Rewrites the whole link set of one staff member, keeping input order.
async fn replace_social_links(
    conn: &mut PgConnection,
    staff_id: i64,
    links: &[SocialLink],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM staff_social_links WHERE staff_id = $1")
        .bind(staff_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if links.is_empty() {
        return Ok(());
    }

    let platforms: Vec<String> = links
        .iter()
        .map(|link| link.platform.as_str().to_owned())
        .collect();
    let urls: Vec<String> = links.iter().map(|link| link.url.clone()).collect();
    sqlx::query(
        "INSERT INTO staff_social_links (staff_id, platform, url, position)
         SELECT $1, t.platform, t.url, t.ord
         FROM UNNEST($2::TEXT[], $3::TEXT[]) WITH ORDINALITY AS t(platform, url, ord)",
    )
    .bind(staff_id)
    .bind(platforms)
    .bind(urls)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl PgRecord for Staff {
    const TABLE: &'static str = "staff";
    const COLUMNS: &'static str = "id, name, position, division_id, sub_division_id, image, \
        sort_order, created_at, updated_at, deleted_at, \
        ARRAY(SELECT l.platform FROM staff_social_links l \
              WHERE l.staff_id = staff.id ORDER BY l.position) AS social_platforms, \
        ARRAY(SELECT l.url FROM staff_social_links l \
              WHERE l.staff_id = staff.id ORDER BY l.position) AS social_urls";
    const HAS_SLUG: bool = false;

    type Row = StaffRow;

    fn from_row(row: StaffRow) -> DomainResult<Self> {
        let social_links = row
            .social_platforms
            .iter()
            .zip(row.social_urls)
            .map(|(platform, url)| SocialLink::new(platform, url))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Staff {
            id: StaffId::new(row.id)?,
            name: Name::new(row.name)?,
            position: Position::new(row.position)?,
            division_id: DivisionId::new(row.division_id)?,
            sub_division_id: row.sub_division_id.map(SubDivisionId::new).transpose()?,
            image: ImagePath::optional(row.image)?,
            social_links,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &DivisionFilter) {
        push_division_filter(builder, filter);
    }

    async fn insert_row(conn: &mut PgConnection, new: NewStaff) -> DomainResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO staff
                 (name, position, division_id, sub_division_id, image, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(new.name.into_inner())
        .bind(new.position.into_inner())
        .bind(new.division_id.0)
        .bind(new.sub_division_id.map(|id| id.0))
        .bind(new.image.map(ImagePath::into_inner))
        .bind(new.sort_order)
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        replace_social_links(conn, id, &new.social_links).await?;
        Ok(id)
    }

    async fn update_row(conn: &mut PgConnection, record: &Staff) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE staff
             SET name = $2, position = $3, division_id = $4, sub_division_id = $5,
                 image = $6, sort_order = $7, updated_at = $8
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(record.id.0)
        .bind(record.name.as_str())
        .bind(record.position.as_str())
        .bind(record.division_id.0)
        .bind(record.sub_division_id.map(|id| id.0))
        .bind(record.image.as_ref().map(ImagePath::as_str))
        .bind(record.sort_order)
        .bind(record.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        replace_social_links(conn, record.id.0, &record.social_links).await?;
        Ok(true)
    }
}
