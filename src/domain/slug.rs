// src/domain/slug.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

pub const MAX_SLUG_LEN: usize = 255;

/// Turns display text into a URL-safe identifier.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

/// Lowercase, hyphen-separated, ASCII-only rendering of `name`.
///
/// Non-ASCII characters are transliterated; anything without alphanumeric
/// content yields an empty string. No uniqueness suffix is ever appended.
pub fn derive_slug(name: &str) -> String {
    ::slug::slugify(name)
}

pub fn is_url_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .split('-')
            .all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if value.len() > MAX_SLUG_LEN {
            return Err(DomainError::Validation(format!(
                "slug must be at most {MAX_SLUG_LEN} characters"
            )));
        }
        if !is_url_safe(&value) {
            return Err(DomainError::Validation(
                "slug may only contain lowercase letters, digits and single hyphens".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Pre-persist slug rules applied by the write path.
///
/// An explicit slug always wins once trimmed and lowercased; a blank one
/// counts as absent.
pub struct SlugPolicy<'a> {
    generator: &'a dyn SlugGenerator,
}

impl<'a> SlugPolicy<'a> {
    pub fn new(generator: &'a dyn SlugGenerator) -> Self {
        Self { generator }
    }

    pub fn on_create(&self, name: &str, provided: Option<&str>) -> DomainResult<Slug> {
        match explicit(provided) {
            Some(value) => Slug::new(value),
            None => self.derive(name),
        }
    }

    /// Returns `None` when the stored slug stays as it is.
    pub fn on_update(
        &self,
        current_name: &str,
        new_name: Option<&str>,
        provided: Option<&str>,
    ) -> DomainResult<Option<Slug>> {
        if let Some(value) = explicit(provided) {
            return Slug::new(value).map(Some);
        }

        let explicitly_blank = provided.is_some();
        match new_name {
            Some(name) if name != current_name => self.derive(name).map(Some),
            Some(name) if explicitly_blank => self.derive(name).map(Some),
            None if explicitly_blank => self.derive(current_name).map(Some),
            _ => Ok(None),
        }
    }

    fn derive(&self, name: &str) -> DomainResult<Slug> {
        let derived = self.generator.slugify(name);
        if derived.is_empty() {
            return Err(DomainError::Validation(
                "cannot derive a slug from a name without letters or digits".into(),
            ));
        }
        Slug::new(derived)
    }
}

fn explicit(provided: Option<&str>) -> Option<String> {
    provided
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}
