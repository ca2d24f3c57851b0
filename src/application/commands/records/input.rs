// src/application/commands/records/input.rs
use crate::{
    application::dto::Actor,
    domain::{
        errors::{DomainResult, FieldErrors},
        record::{Action, Record},
        slug::{Slug, SlugPolicy},
    },
};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// Values shared by every validation step of one write.
pub struct WriteContext<'a> {
    pub now: DateTime<Utc>,
    pub slugs: SlugPolicy<'a>,
    pub actor: &'a Actor,
}

impl WriteContext<'_> {
    /// Slug for a new record. Skipped while the name itself is invalid
    /// unless an explicit slug was sent.
    pub fn create_slug(
        &self,
        errors: &mut FieldErrors,
        name: Option<&str>,
        provided: Option<&str>,
    ) -> Option<Slug> {
        let explicit = provided.is_some_and(|value| !value.trim().is_empty());
        match name {
            Some(name) => errors.capture("slug", self.slugs.on_create(name, provided)),
            None if explicit => errors.capture("slug", self.slugs.on_create("", provided)),
            None => None,
        }
    }

    /// Replacement slug for an edited record; `None` keeps the stored one.
    pub fn update_slug(
        &self,
        errors: &mut FieldErrors,
        current_name: &str,
        new_name: Option<&str>,
        provided: Option<&str>,
    ) -> Option<Slug> {
        errors
            .capture("slug", self.slugs.on_update(current_name, new_name, provided))
            .flatten()
    }
}

/// Required field that may be missing from the payload altogether.
pub fn required<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<DomainResult<T>>,
) -> Option<T> {
    match value {
        Some(result) => errors.capture(field, result),
        None => {
            errors.insert(field, "is required");
            None
        }
    }
}

pub trait CreateInput<R: Record>: Send {
    /// Permission checked in addition to `create <resource>`.
    fn extra_permission(&self) -> Option<Action> {
        None
    }

    fn into_new(self, ctx: &WriteContext<'_>) -> Result<R::New, FieldErrors>;
}

pub trait UpdateInput<R: Record>: Send {
    /// Permission checked in addition to `edit <resource>`.
    fn extra_permission(&self) -> Option<Action> {
        None
    }

    /// Validates the patch and applies it to `record`; nothing is applied
    /// when any field is rejected.
    fn apply(self, record: &mut R, ctx: &WriteContext<'_>) -> Result<(), FieldErrors>;
}

/// A record exposed through the admin write path and its HTTP payloads.
pub trait ManagedRecord: Record {
    type Dto: Serialize + From<Self> + Send + 'static;
    type Create: CreateInput<Self> + DeserializeOwned + Send + 'static;
    type Update: UpdateInput<Self> + DeserializeOwned + Send + 'static;
}
