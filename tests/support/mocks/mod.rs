// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod security;
pub mod time;
pub mod util;

pub use security::{
    ADMIN_TOKEN, EDITOR_TOKEN, STRANGER_TOKEN, admin, editor, stranger, test_authorizer,
    test_token_resolver,
};
pub use time::fixed_now;
pub use util::{FixedClock, StepClock};
