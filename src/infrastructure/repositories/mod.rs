// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres;

pub use memory::{InMemoryRecordRepository, in_memory_repositories};
pub use postgres::{PgRecord, PostgresRecordRepository, postgres_repositories};
