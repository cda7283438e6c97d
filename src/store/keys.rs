pub fn goal_list_key(learner_id: &str) -> String {
    learner_id.to_string()
}

pub fn review_collection_key(learner_id: &str) -> String {
    learner_id.to_string()
}
