use crate::shared::constants::{
    COMPLETION_SCORE, PRONUNCIATION_EXCELLENT_SCORE, PRONUNCIATION_FAIR_SCORE,
    PRONUNCIATION_GOOD_SCORE, QUIZ_EXCELLENT_PERCENT, QUIZ_FAIR_PERCENT, QUIZ_GOOD_PERCENT,
};

/// Feedback band shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    pub const ALL: &[ScoreTier] = &[
        ScoreTier::Excellent,
        ScoreTier::Good,
        ScoreTier::Fair,
        ScoreTier::Poor,
    ];

    /// Bands for a pronunciation score: 90 / 75 / 60.
    pub fn from_pronunciation_score(score: u32) -> Self {
        if score >= PRONUNCIATION_EXCELLENT_SCORE {
            ScoreTier::Excellent
        } else if score >= PRONUNCIATION_GOOD_SCORE {
            ScoreTier::Good
        } else if score >= PRONUNCIATION_FAIR_SCORE {
            ScoreTier::Fair
        } else {
            ScoreTier::Poor
        }
    }

    /// Bands for a quiz percentage: 90 / 70 / 50.
    pub fn from_quiz_percentage(percentage: f64) -> Self {
        if percentage >= QUIZ_EXCELLENT_PERCENT {
            ScoreTier::Excellent
        } else if percentage >= QUIZ_GOOD_PERCENT {
            ScoreTier::Good
        } else if percentage >= QUIZ_FAIR_PERCENT {
            ScoreTier::Fair
        } else {
            ScoreTier::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Fair => "fair",
            ScoreTier::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreTier::Excellent => write!(f, "Excellent"),
            ScoreTier::Good => write!(f, "Good"),
            ScoreTier::Fair => write!(f, "Fair"),
            ScoreTier::Poor => write!(f, "Poor"),
        }
    }
}

/// Whether a pronunciation score marks its sentence as completed.
pub fn is_completed(score: u32) -> bool {
    score >= COMPLETION_SCORE
}
