use chrono::{DateTime, Utc};

/// Source of the current instant for scheduling decisions.
///
/// Injected through `AppState` so tests can pin time instead of racing the
/// wall clock.
pub trait ReviewClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used by the running service.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ReviewClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl ReviewClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
