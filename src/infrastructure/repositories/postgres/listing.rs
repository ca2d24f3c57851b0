// src/infrastructure/repositories/postgres/listing.rs
use super::{PgRecord, map_sqlx, trashed_condition};
use crate::domain::{
    errors::DomainResult,
    listing::{ListQuery, Page},
};
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Escapes `LIKE` wildcards; backslash is the default escape character.
pub(super) fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn push_conditions<R: PgRecord>(
    builder: &mut QueryBuilder<'_, Postgres>,
    query: &ListQuery,
    filter: &R::Filter,
) {
    builder.push(" WHERE ");
    builder.push(trashed_condition(query.trashed));

    if let Some(search) = query.search.as_deref() {
        let pattern = like_pattern(search);
        builder.push(" AND (");
        for (index, column) in R::LIST.searchable.iter().enumerate() {
            if index > 0 {
                builder.push(" OR ");
            }
            builder.push(*column).push(" ILIKE ");
            builder.push_bind(pattern.clone());
        }
        builder.push(")");
    }

    R::push_filter(builder, filter);
}

pub(super) async fn list<R: PgRecord>(
    pool: &PgPool,
    query: &ListQuery,
    filter: &R::Filter,
) -> DomainResult<Page<R>> {
    let mut count: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", R::TABLE));
    push_conditions::<R>(&mut count, query, filter);
    let total: i64 = count
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await
        .map_err(map_sqlx)?;

    let mut select: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM {}", R::COLUMNS, R::TABLE));
    push_conditions::<R>(&mut select, query, filter);
    match query.sort {
        // Column names come from the entity whitelist only.
        Some(sort) => select.push(format!(
            " ORDER BY {} {}, id ASC",
            sort.column,
            sort.direction.as_sql()
        )),
        None => select.push(" ORDER BY id ASC"),
    };
    select.push(" LIMIT ");
    select.push_bind(i64::try_from(query.limit()).unwrap_or(i64::MAX));
    select.push(" OFFSET ");
    select.push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));

    let rows = select
        .build_query_as::<R::Row>()
        .fetch_all(pool)
        .await
        .map_err(map_sqlx)?;
    let items = rows
        .into_iter()
        .map(R::from_row)
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(Page::new(items, query, u64::try_from(total).unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("robot"), "%robot%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
