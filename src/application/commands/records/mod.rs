pub mod input;
pub mod service;

pub use input::{CreateInput, ManagedRecord, UpdateInput, WriteContext, required};
pub use service::RecordCommandService;
