// src/application/ports/util.rs
pub use crate::domain::slug::SlugGenerator;
