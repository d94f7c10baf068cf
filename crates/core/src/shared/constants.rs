pub const EXACT_MATCH_SCORE: u32 = 100;
pub const NEAR_MATCH_SCORE: u32 = 85;
pub const SUBSTRING_MATCH_SCORE: u32 = 75;

/// Near matches only apply to target words longer than this.
pub const NEAR_MATCH_MIN_WORD_LEN: usize = 3;
pub const SUBSTRING_MAX_LEN_DIFF: usize = 2;

/// Fuzzy tolerance as a fraction of the target word length (floored, min 1).
pub const FUZZY_DISTANCE_RATIO: f64 = 0.4;
pub const FUZZY_BASE_SCORE: u32 = 80;
pub const FUZZY_DISTANCE_STEP: u32 = 20;
pub const FUZZY_MIN_SCORE: u32 = 40;

pub const HIGH_PERFECT_RATIO: f64 = 0.8;
pub const HIGH_PERFECT_BONUS: i32 = 10;
pub const MID_PERFECT_RATIO: f64 = 0.6;
pub const MID_PERFECT_BONUS: i32 = 5;

pub const LENGTH_PROXIMITY_WORDS: usize = 1;
pub const LENGTH_PROXIMITY_BONUS: i32 = 3;

pub const LOW_MATCH_RATIO: f64 = 0.3;
pub const LOW_MATCH_PENALTY: i32 = 15;
pub const LOW_MATCH_FLOOR: i32 = 10;

/// Any non-empty attempt scoring below this is raised to `ATTEMPT_FLOOR_SCORE`.
pub const ATTEMPT_FLOOR_THRESHOLD: i32 = 5;
pub const ATTEMPT_FLOOR_SCORE: i32 = 10;

pub const MAX_SCORE: u32 = 100;

// Pronunciation tier lower bounds
pub const PRONUNCIATION_EXCELLENT_SCORE: u32 = 90;
pub const PRONUNCIATION_GOOD_SCORE: u32 = 75;
pub const PRONUNCIATION_FAIR_SCORE: u32 = 60;

/// A sentence scored at or above this counts as completed.
pub const COMPLETION_SCORE: u32 = PRONUNCIATION_GOOD_SCORE;

// Quiz tier lower bounds, in percent
pub const QUIZ_EXCELLENT_PERCENT: f64 = 90.0;
pub const QUIZ_GOOD_PERCENT: f64 = 70.0;
pub const QUIZ_FAIR_PERCENT: f64 = 50.0;

pub const STORE_KEY_PRONUNCIATION_SCORES: &str = "pronunciationScores";
pub const STORE_KEY_QUIZ_SELECTIONS: &str = "quizSelections";

pub const APP_DIR_NAME: &str = "SpeakCheck";
pub const STORE_FILENAME: &str = "storage.json";
