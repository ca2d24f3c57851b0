// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Shared by every handler through an `Extension` layer; the storage
/// backend is already hidden behind the services.
#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
}
