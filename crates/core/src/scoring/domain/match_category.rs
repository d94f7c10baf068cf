use super::edit_distance::edit_distance;
use crate::shared::constants::{
    EXACT_MATCH_SCORE, FUZZY_BASE_SCORE, FUZZY_DISTANCE_RATIO, FUZZY_DISTANCE_STEP,
    FUZZY_MIN_SCORE, NEAR_MATCH_MIN_WORD_LEN, NEAR_MATCH_SCORE, SUBSTRING_MATCH_SCORE,
    SUBSTRING_MAX_LEN_DIFF,
};

/// How a transcript word matched a target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchCategory {
    Exact,
    /// Edit distance of exactly one on a target word longer than three chars.
    Near,
    /// One word contains the other and their lengths differ by at most two.
    /// Containment with a larger gap is [`MatchCategory::None`].
    Substring,
    /// Within the length-scaled edit distance tolerance.
    Fuzzy,
    None,
}

impl MatchCategory {
    pub fn is_perfect(self) -> bool {
        self == MatchCategory::Exact
    }

    pub fn is_partial(self) -> bool {
        matches!(
            self,
            MatchCategory::Near | MatchCategory::Substring | MatchCategory::Fuzzy
        )
    }
}

impl std::fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchCategory::Exact => write!(f, "exact"),
            MatchCategory::Near => write!(f, "near"),
            MatchCategory::Substring => write!(f, "substring"),
            MatchCategory::Fuzzy => write!(f, "fuzzy"),
            MatchCategory::None => write!(f, "none"),
        }
    }
}

/// Result of comparing one target word against one transcript word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    pub category: MatchCategory,
    pub score: u32,
}

impl WordMatch {
    pub const NONE: WordMatch = WordMatch {
        category: MatchCategory::None,
        score: 0,
    };

    /// Classifies a single comparison. Rules are tried in order
    /// exact, near, substring, fuzzy; the first one satisfied wins.
    pub fn classify(spoken: &str, target: &str) -> Self {
        if spoken == target {
            return Self {
                category: MatchCategory::Exact,
                score: EXACT_MATCH_SCORE,
            };
        }

        let target_len = target.chars().count();
        let spoken_len = spoken.chars().count();
        let distance = edit_distance(spoken, target);

        if distance == 1 && target_len > NEAR_MATCH_MIN_WORD_LEN {
            return Self {
                category: MatchCategory::Near,
                score: NEAR_MATCH_SCORE,
            };
        }

        // Containment settles the comparison: too large a length gap is no
        // match at all, never a fuzzy one.
        if spoken.contains(target) || target.contains(spoken) {
            if spoken_len.abs_diff(target_len) <= SUBSTRING_MAX_LEN_DIFF {
                return Self {
                    category: MatchCategory::Substring,
                    score: SUBSTRING_MATCH_SCORE,
                };
            }
            return Self::NONE;
        }

        if distance <= fuzzy_tolerance(target_len) {
            let penalty = FUZZY_DISTANCE_STEP.saturating_mul(distance as u32);
            return Self {
                category: MatchCategory::Fuzzy,
                score: FUZZY_BASE_SCORE.saturating_sub(penalty).max(FUZZY_MIN_SCORE),
            };
        }

        Self::NONE
    }
}

/// Largest edit distance a fuzzy match tolerates for a target of this length.
pub fn fuzzy_tolerance(target_len: usize) -> usize {
    ((target_len as f64 * FUZZY_DISTANCE_RATIO).floor() as usize).max(1)
}
