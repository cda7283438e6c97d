use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::STARTER_VOCABULARY;
use crate::store::keys;
use crate::store::{Store, StoreError};

/// The learner's ordered goal list. Position in `words` is the priority:
/// the first word carries rank 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalList {
    pub learner_id: String,
    pub words: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn get_goal_list(&self, learner_id: &str) -> Result<Option<GoalList>, StoreError> {
        let key = keys::goal_list_key(learner_id);
        match self.goal_lists.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_goal_list(&self, goal_list: &GoalList) -> Result<(), StoreError> {
        let key = keys::goal_list_key(&goal_list.learner_id);
        self.goal_lists
            .insert(key.as_bytes(), Self::serialize(goal_list)?)?;
        Ok(())
    }

    /// The learner's active vocabulary in priority order: the stored goal
    /// list, or the starter vocabulary when none has been set yet.
    pub fn active_vocabulary(&self, learner_id: &str) -> Result<Vec<String>, StoreError> {
        match self.get_goal_list(learner_id)? {
            Some(goal_list) => Ok(goal_list.words),
            None => Ok(STARTER_VOCABULARY.iter().map(|w| w.to_string()).collect()),
        }
    }
}
