pub mod goal_lists;
pub mod review_collections;
