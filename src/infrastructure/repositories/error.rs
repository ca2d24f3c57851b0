// src/infrastructure/repositories/error.rs
use crate::domain::{errors::DomainError, staff::sub_division_outside_division};

/// Suffix shared by the partial unique indexes over live slugs.
const SLUG_INDEX_SUFFIX: &str = "_slug_live_idx";
const CNT_ARTICLE_PUBLISHED_CHECK: &str = "articles_published_at_chk";
const CNT_STAFF_SUB_DIVISION_PAIR: &str = "staff_sub_division_division_fkey";

/// Foreign keys and the request field each one validates.
const FOREIGN_KEY_FIELDS: &[(&str, &str)] = &[
    ("articles_category_id_fkey", "category_id"),
    ("articles_author_id_fkey", "author_id"),
    ("article_tag_tag_id_fkey", "tag_ids"),
    ("sub_divisions_division_id_fkey", "division_id"),
    ("staff_division_id_fkey", "division_id"),
    ("staff_sub_division_id_fkey", "sub_division_id"),
];

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                if constraint.ends_with(SLUG_INDEX_SUFFIX) {
                    return DomainError::Uniqueness { field: "slug" };
                }
                if constraint == CNT_ARTICLE_PUBLISHED_CHECK {
                    return DomainError::Validation(
                        "published articles require published_at".into(),
                    );
                }
                if constraint == CNT_STAFF_SUB_DIVISION_PAIR {
                    return sub_division_outside_division();
                }
                if let Some(&(_, field)) = FOREIGN_KEY_FIELDS
                    .iter()
                    .find(|(name, _)| *name == constraint)
                {
                    return DomainError::MissingReference { field };
                }
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Validation("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::Validation("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// For deletes, a foreign-key failure means other rows still point here.
pub fn map_purge_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            DomainError::Validation("record is still referenced by other records".into())
        }
        _ => map_sqlx(err),
    }
}
