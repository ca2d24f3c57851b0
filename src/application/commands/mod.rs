pub mod articles;
pub mod categories;
pub mod divisions;
pub mod galleries;
pub mod products;
pub mod records;
pub mod staff;
pub mod tags;

pub use records::{ManagedRecord, RecordCommandService};
