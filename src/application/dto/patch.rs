// src/application/dto/patch.rs
//! Tri-state fields for partial updates.
//!
//! Pair with `#[serde(default, deserialize_with = "nullable")]` on an
//! `Option<Option<T>>`: a missing key stays `None`, an explicit `null`
//! becomes `Some(None)` and a value becomes `Some(Some(value))`.
use serde::{Deserialize, Deserializer};

pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
