// src/application/ports/mod.rs
pub mod authentication;
pub mod authorization;
pub mod time;
pub mod util;
