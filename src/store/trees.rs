pub const GOAL_LISTS: &str = "goal_lists";
pub const REVIEW_COLLECTIONS: &str = "review_collections";
