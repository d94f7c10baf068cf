pub mod edit_distance;
pub mod match_category;
pub mod pronunciation_scorer;
pub mod score_tier;
pub mod word_sequence;
