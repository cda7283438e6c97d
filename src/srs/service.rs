//! The two operations the HTTP layer drives: a read-only due-queue build and
//! a persistable outcome recording. Both are pure functions of the supplied
//! collection and instant, so the two callers can never disagree about state.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use super::lesson::{self, LessonQueue};
use super::selector::DueSelector;
use super::{ReviewCollection, SrsError};

/// Derives the priority map from the learner's ordered goal list: rank 1 is
/// the most relevant word. The first occurrence wins for duplicates.
pub fn goal_ranks(vocabulary: &[String]) -> HashMap<String, u32> {
    let mut ranks = HashMap::with_capacity(vocabulary.len());
    for (index, word) in vocabulary.iter().enumerate() {
        ranks.entry(word.clone()).or_insert(index as u32 + 1);
    }
    ranks
}

/// Builds the lesson queue for one session without touching persisted state.
///
/// The drain runs on a disposable selector hydrated from a copy of the
/// collection; due words that are no longer part of the active vocabulary
/// are dropped from the preview (their history stays persisted untouched).
pub fn build_due_queue(
    vocabulary: &[String],
    ranks: &HashMap<String, u32>,
    collection: &ReviewCollection,
    now: DateTime<Utc>,
    new_word_limit: usize,
) -> LessonQueue {
    let mut preview = DueSelector::from_collection(collection.clone(), ranks.clone(), now);
    let visible: HashSet<&str> = vocabulary.iter().map(String::as_str).collect();

    let mut due_words = preview.drain_due(now);
    due_words.retain(|word| visible.contains(word.as_str()));

    lesson::assemble(due_words, vocabulary, collection, new_word_limit)
}

/// Applies one review outcome and returns the full updated collection along
/// with the word's next due instant. The caller persists the collection as a
/// whole; ranked words the collection has not seen yet are materialized as
/// fresh entries so the persisted document covers the active vocabulary.
pub fn record_outcome(
    collection: ReviewCollection,
    ranks: &HashMap<String, u32>,
    word: &str,
    quality: u8,
    now: DateTime<Utc>,
) -> Result<(ReviewCollection, DateTime<Utc>), SrsError> {
    let mut selector = DueSelector::from_collection(collection, ranks.clone(), now);
    let next_review = selector.review(word, quality, now)?;
    Ok((selector.into_collection(), next_review))
}
