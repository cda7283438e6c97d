//! Spaced-repetition scheduling core.
//!
//! Everything in this module is pure: callers supply the current instant and
//! the persisted state, and get back new state to persist. The HTTP layer in
//! `routes::lesson` is a thin shell around [`service::build_due_queue`] and
//! [`service::record_outcome`].

pub mod clock;
pub mod lesson;
pub mod scheduler;
pub mod selector;
pub mod service;

use std::collections::BTreeMap;

use thiserror::Error;

pub use clock::{ReviewClock, SystemClock};
pub use scheduler::ReviewState;
pub use selector::DueSelector;

/// Full persisted review document for one learner: word → review state.
///
/// This is the unit of persistence atomicity; loads and saves always operate
/// on the whole collection. A `BTreeMap` keeps iteration and serialization
/// order deterministic.
pub type ReviewCollection = BTreeMap<String, ReviewState>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SrsError {
    #[error("quality must be between 0 and 5, got {0}")]
    InvalidQuality(u8),
}
