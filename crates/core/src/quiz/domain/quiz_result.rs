use crate::scoring::domain::score_tier::ScoreTier;

/// Grading of one question at submission time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub selected: Option<usize>,
    pub correct_option: usize,
}

impl QuestionOutcome {
    pub fn is_correct(&self) -> bool {
        self.selected == Some(self.correct_option)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizResult {
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizResult {
    pub fn correct(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_correct()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Share of correct answers in percent; 0 for an empty quiz.
    pub fn percentage(&self) -> f64 {
        if self.outcomes.is_empty() {
            0.0
        } else {
            self.correct() as f64 / self.total() as f64 * 100.0
        }
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_quiz_percentage(self.percentage())
    }

    pub fn feedback(&self) -> &'static str {
        match self.tier() {
            ScoreTier::Excellent => "Excellent! You understood the lesson very well.",
            ScoreTier::Good => {
                "Good! You got most of it. Listen to a few parts again to understand them better."
            }
            ScoreTier::Fair => {
                "Fair. You need more practice. Listen again and read the transcript carefully."
            }
            ScoreTier::Poor => {
                "Keep trying! Listen to the recording several times and review the vocabulary."
            }
        }
    }
}
