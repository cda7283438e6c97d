//! Input validation shared by the lesson and goal routes.

use crate::constants::{MAX_GOAL_WORDS, MAX_LEARNER_ID_LEN, MAX_WORD_LEN};

/// Learner ids become sled keys, so the charset is restricted to letters,
/// digits, hyphens and underscores.
pub fn validate_learner_id(learner_id: &str) -> Result<(), &'static str> {
    if learner_id.is_empty() {
        return Err("learnerId must not be empty");
    }
    if learner_id.len() > MAX_LEARNER_ID_LEN {
        return Err("learnerId must not exceed 128 characters");
    }
    if !learner_id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err("learnerId may only contain letters, digits, hyphens and underscores");
    }
    Ok(())
}

/// Normalizes a goal word list: trims entries, rejects blank or oversized
/// words, and caps the list length. Order is preserved.
pub fn normalize_goal_words(words: &[String]) -> Result<Vec<String>, &'static str> {
    if words.len() > MAX_GOAL_WORDS {
        return Err("goal list must not exceed 1000 words");
    }
    let mut normalized = Vec::with_capacity(words.len());
    for word in words {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            return Err("goal words must not be blank");
        }
        if trimmed.chars().count() > MAX_WORD_LEN {
            return Err("goal words must not exceed 100 characters");
        }
        normalized.push(trimmed.to_string());
    }
    Ok(normalized)
}
