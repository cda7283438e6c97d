use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::scheduler::ReviewState;
use super::{ReviewCollection, SrsError};

/// Priority queue over per-word review states.
///
/// Selection never mutates: [`DueSelector::peek_next_due`] answers the same
/// word until the caller records a review or explicitly removes the entry.
/// Draining a due set for a lesson preview therefore happens on a disposable
/// selector built from a copy of the persisted collection; removal is local
/// to the instance and never touches stored history.
#[derive(Debug, Clone)]
pub struct DueSelector {
    entries: ReviewCollection,
    ranks: HashMap<String, u32>,
}

impl DueSelector {
    /// Selector for a learner with no prior state: every ranked word starts
    /// fresh and immediately due, so the first session always has content.
    pub fn new(ranks: HashMap<String, u32>, now: DateTime<Utc>) -> Self {
        Self::from_collection(ReviewCollection::new(), ranks, now)
    }

    /// Hydrates a selector from a persisted collection, creating a fresh
    /// entry for every ranked word the collection has not seen yet.
    pub fn from_collection(
        collection: ReviewCollection,
        ranks: HashMap<String, u32>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut entries = collection;
        for word in ranks.keys() {
            if !entries.contains_key(word) {
                entries.insert(word.clone(), ReviewState::new(now));
            }
        }
        Self { entries, ranks }
    }

    /// The single highest-priority due word, if any.
    ///
    /// Lowest rank wins; unranked words sort after every ranked word; ties
    /// break on the earlier due instant and finally on lexical word order.
    /// Repeated calls without an intervening mutation return the same word.
    pub fn peek_next_due(&self, now: DateTime<Utc>) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(_, state)| state.is_due(now))
            .min_by(|(word_a, state_a), (word_b, state_b)| {
                self.rank_of(word_a)
                    .cmp(&self.rank_of(word_b))
                    .then_with(|| state_a.next_review.cmp(&state_b.next_review))
                    .then_with(|| word_a.cmp(word_b))
            })
            .map(|(word, _)| word.as_str())
    }

    fn rank_of(&self, word: &str) -> u32 {
        self.ranks.get(word).copied().unwrap_or(u32::MAX)
    }

    /// Drops a word from this selector instance only.
    pub fn remove(&mut self, word: &str) -> Option<ReviewState> {
        self.entries.remove(word)
    }

    /// Pops due words in priority order, removing each from this instance,
    /// until nothing is due.
    pub fn drain_due(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let mut drained = Vec::new();
        while let Some(word) = self.peek_next_due(now) {
            let word = word.to_string();
            self.remove(&word);
            drained.push(word);
        }
        drained
    }

    /// Records one review outcome, creating the state lazily on first
    /// contact, and returns the new due instant. This is the only mutation
    /// path whose result may legitimately be persisted.
    pub fn review(
        &mut self,
        word: &str,
        quality: u8,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SrsError> {
        // Validate before the lazy insert so a rejected outcome leaves the
        // collection byte-for-byte unchanged.
        if quality > super::scheduler::MAX_QUALITY {
            return Err(SrsError::InvalidQuality(quality));
        }
        let state = self
            .entries
            .entry(word.to_string())
            .or_insert_with(|| ReviewState::new(now));
        state.review(quality, now)
    }

    pub fn state_of(&self, word: &str) -> Option<&ReviewState> {
        self.entries.get(word)
    }

    pub fn into_collection(self) -> ReviewCollection {
        self.entries
    }
}
