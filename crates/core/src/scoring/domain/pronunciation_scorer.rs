use super::match_category::{MatchCategory, WordMatch};
use super::word_sequence::WordSequence;
use crate::shared::constants::{
    ATTEMPT_FLOOR_SCORE, ATTEMPT_FLOOR_THRESHOLD, HIGH_PERFECT_BONUS, HIGH_PERFECT_RATIO,
    LENGTH_PROXIMITY_BONUS, LENGTH_PROXIMITY_WORDS, LOW_MATCH_FLOOR, LOW_MATCH_PENALTY,
    LOW_MATCH_RATIO, MAX_SCORE, MID_PERFECT_BONUS, MID_PERFECT_RATIO,
};

/// Best match found for one target word across the whole transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetWordResult {
    pub target: String,
    /// Transcript word that produced the best match, if any matched.
    pub spoken: Option<String>,
    pub best: WordMatch,
}

/// Every intermediate value of one scoring call.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBreakdown {
    pub words: Vec<TargetWordResult>,
    pub transcript_word_count: usize,
    pub perfect_matches: usize,
    pub partial_matches: usize,
    /// Rounded mean of the per-word best scores.
    pub base_accuracy: u32,
    pub ratio_bonus: i32,
    pub length_bonus: i32,
    pub low_match_penalty_applied: bool,
    pub attempt_floor_applied: bool,
    pub score: u32,
}

impl ScoreBreakdown {
    fn empty(transcript_word_count: usize) -> Self {
        Self {
            words: Vec::new(),
            transcript_word_count,
            perfect_matches: 0,
            partial_matches: 0,
            base_accuracy: 0,
            ratio_bonus: 0,
            length_bonus: 0,
            low_match_penalty_applied: false,
            attempt_floor_applied: false,
            score: 0,
        }
    }

    pub fn target_word_count(&self) -> usize {
        self.words.len()
    }

    pub fn perfect_ratio(&self) -> f64 {
        ratio(self.perfect_matches, self.words.len())
    }

    pub fn match_ratio(&self) -> f64 {
        ratio(self.perfect_matches + self.partial_matches, self.words.len())
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Running totals over the per-word pass.
#[derive(Default)]
struct ScoreAccumulator {
    total: u32,
    perfect: usize,
    partial: usize,
}

impl ScoreAccumulator {
    fn add(&mut self, best: &WordMatch) {
        self.total += best.score;
        if best.category.is_perfect() {
            self.perfect += 1;
        } else if best.category.is_partial() {
            self.partial += 1;
        }
    }
}

/// Scores a spoken attempt against the sentence the learner was asked to say.
///
/// Every target word is compared with every transcript word (no positional
/// alignment); the best comparison per target word counts. The mean is then
/// adjusted by ratio bonuses, a length-proximity bonus, a low-match penalty
/// and an attempt floor, and clamped to `0..=100`.
pub struct PronunciationScorer;

impl PronunciationScorer {
    pub fn score(recognized: &str, target: &str) -> u32 {
        Self::evaluate(recognized, target).score
    }

    pub fn evaluate(recognized: &str, target: &str) -> ScoreBreakdown {
        let spoken = WordSequence::normalize(recognized);
        let expected = WordSequence::normalize(target);

        if spoken.is_empty() || expected.is_empty() {
            log::debug!("Empty input for scoring");
            return ScoreBreakdown::empty(spoken.len());
        }

        log::debug!("Comparing \"{spoken}\" against \"{expected}\"");

        let mut acc = ScoreAccumulator::default();
        let words: Vec<TargetWordResult> = expected
            .iter()
            .map(|target_word| {
                let result = best_match(target_word, &spoken);
                acc.add(&result.best);
                if result.best.category == MatchCategory::None {
                    log::debug!("No match found for word \"{target_word}\"");
                }
                result
            })
            .collect();

        let target_count = words.len();
        let base_accuracy = (acc.total as f64 / target_count as f64).round() as u32;
        let mut accuracy = base_accuracy as i32;

        let perfect_ratio = ratio(acc.perfect, target_count);
        let ratio_bonus = if perfect_ratio >= HIGH_PERFECT_RATIO {
            HIGH_PERFECT_BONUS
        } else if perfect_ratio >= MID_PERFECT_RATIO {
            MID_PERFECT_BONUS
        } else {
            0
        };
        accuracy += ratio_bonus;

        let length_bonus = if spoken.len().abs_diff(target_count) <= LENGTH_PROXIMITY_WORDS {
            LENGTH_PROXIMITY_BONUS
        } else {
            0
        };
        accuracy += length_bonus;

        let match_ratio = ratio(acc.perfect + acc.partial, target_count);
        let low_match_penalty_applied = match_ratio < LOW_MATCH_RATIO;
        if low_match_penalty_applied {
            accuracy = (accuracy - LOW_MATCH_PENALTY).max(LOW_MATCH_FLOOR);
        }

        let attempt_floor_applied = accuracy < ATTEMPT_FLOOR_THRESHOLD;
        if attempt_floor_applied {
            accuracy = ATTEMPT_FLOOR_SCORE;
        }

        let score = accuracy.clamp(0, MAX_SCORE as i32) as u32;

        log::debug!(
            "Scoring details: perfect {}/{target_count}, partial {}/{target_count}, match ratio {:.0}%, final {score}/100",
            acc.perfect,
            acc.partial,
            match_ratio * 100.0,
        );

        ScoreBreakdown {
            words,
            transcript_word_count: spoken.len(),
            perfect_matches: acc.perfect,
            partial_matches: acc.partial,
            base_accuracy,
            ratio_bonus,
            length_bonus,
            low_match_penalty_applied,
            attempt_floor_applied,
            score,
        }
    }
}

/// Shorthand for [`PronunciationScorer::score`].
pub fn score(recognized: &str, target: &str) -> u32 {
    PronunciationScorer::score(recognized, target)
}

fn best_match(target_word: &str, spoken: &WordSequence) -> TargetWordResult {
    let mut best = WordMatch::NONE;
    let mut best_word = None;

    for spoken_word in spoken.iter() {
        let candidate = WordMatch::classify(spoken_word, target_word);
        if candidate.score > best.score {
            best = candidate;
            best_word = Some(spoken_word);
        }
    }

    TargetWordResult {
        target: target_word.to_string(),
        spoken: best_word.map(str::to_string),
        best,
    }
}
