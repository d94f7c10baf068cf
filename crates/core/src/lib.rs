//! Pronunciation scoring, practice sessions and listening quizzes.
//!
//! The scoring core is [`PronunciationScorer`]: a pure function from a
//! recognized transcript and a target sentence to a score in `0..=100`.

pub mod lesson;
pub mod pipeline;
pub mod practice;
pub mod quiz;
pub mod scoring;
pub mod shared;
pub mod storage;

pub use lesson::{Lesson, LessonError};
pub use scoring::domain::edit_distance::edit_distance;
pub use scoring::domain::pronunciation_scorer::{score, PronunciationScorer, ScoreBreakdown};
pub use scoring::domain::score_tier::ScoreTier;
