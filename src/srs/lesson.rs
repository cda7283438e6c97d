use std::collections::HashSet;

use serde::Serialize;

use super::ReviewCollection;

/// Ordered word list for one study session: due words in priority order,
/// then up to the configured cap of never-reviewed words. An empty queue
/// means "nothing due", not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonQueue {
    pub due_words: Vec<String>,
    pub new_words: Vec<String>,
}

impl LessonQueue {
    /// The concatenated drill order, due words first.
    pub fn words(&self) -> Vec<String> {
        let mut words = self.due_words.clone();
        words.extend(self.new_words.iter().cloned());
        words
    }

    pub fn is_empty(&self) -> bool {
        self.due_words.is_empty() && self.new_words.is_empty()
    }
}

/// Combines a drained due list with a capped set of never-reviewed words.
///
/// New words are taken from `vocabulary` in first-seen order, de-duplicated,
/// skipping anything already due (due wins) and anything with a prior
/// successful review (`repetitions > 0`). The queue only names words; the
/// exercise content for them is someone else's job.
pub fn assemble(
    due_words: Vec<String>,
    vocabulary: &[String],
    collection: &ReviewCollection,
    new_word_limit: usize,
) -> LessonQueue {
    let due_set: HashSet<&str> = due_words.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut new_words = Vec::new();

    for word in vocabulary {
        if new_words.len() >= new_word_limit {
            break;
        }
        if due_set.contains(word.as_str()) || !seen.insert(word.as_str()) {
            continue;
        }
        let never_reviewed = collection.get(word).map_or(true, |state| state.is_new());
        if never_reviewed {
            new_words.push(word.clone());
        }
    }

    LessonQueue {
        due_words,
        new_words,
    }
}
