// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of `created_at`, `updated_at`, `published_at` and `deleted_at`
/// stamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
