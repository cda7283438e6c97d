use chrono::{DateTime, Utc};

use crate::srs::{ReviewCollection, ReviewState};
use crate::store::keys;
use crate::store::{Store, StoreError};

impl Store {
    /// Loads the learner's full review collection.
    ///
    /// A missing document is an empty collection. Per-word entries with
    /// absent or malformed fields fall back to fresh-state defaults dated
    /// `now` instead of failing the load; a document that is not a JSON
    /// object at all is treated as empty and logged.
    pub fn get_review_collection(
        &self,
        learner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewCollection, StoreError> {
        let key = keys::review_collection_key(learner_id);
        let Some(raw) = self.review_collections.get(key.as_bytes())? else {
            return Ok(ReviewCollection::new());
        };

        let document: serde_json::Value = match serde_json::from_slice(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(learner_id, %error, "Unparseable review document, starting empty");
                return Ok(ReviewCollection::new());
            }
        };

        let Some(entries) = document.as_object() else {
            tracing::warn!(learner_id, "Review document is not an object, starting empty");
            return Ok(ReviewCollection::new());
        };

        Ok(entries
            .iter()
            .map(|(word, value)| (word.clone(), ReviewState::from_value(value, now)))
            .collect())
    }

    /// Replaces the learner's review collection as one atomic document.
    pub fn set_review_collection(
        &self,
        learner_id: &str,
        collection: &ReviewCollection,
    ) -> Result<(), StoreError> {
        let key = keys::review_collection_key(learner_id);
        self.review_collections
            .insert(key.as_bytes(), Self::serialize(collection)?)?;
        Ok(())
    }
}
