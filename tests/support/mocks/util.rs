// tests/support/mocks/util.rs
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

use super::time::fixed_now;

#[derive(Clone, Default)]
pub struct FixedClock;

impl profil_cms::application::ports::time::Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Advances one minute per reading, so successive writes get distinct
/// timestamps.
#[derive(Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl profil_cms::application::ports::time::Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        fixed_now() + Duration::minutes(tick)
    }
}
