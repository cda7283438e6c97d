/// Default cap on never-reviewed words introduced per lesson.
pub const DEFAULT_NEW_WORD_LIMIT: usize = 3;

/// Maximum number of words accepted in one goal list.
pub const MAX_GOAL_WORDS: usize = 1_000;

/// Maximum length of a single goal word.
pub const MAX_WORD_LEN: usize = 100;

/// Maximum length of a learner identifier.
pub const MAX_LEARNER_ID_LEN: usize = 128;

/// Vocabulary served to learners who have not stored a goal list yet.
pub const STARTER_VOCABULARY: &[&str] = &["hola", "adios", "gracias", "por favor"];
