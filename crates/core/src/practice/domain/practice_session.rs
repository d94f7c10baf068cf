use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::recognition_error::RecognitionError;
use super::recognized_speech::RecognizedSpeech;
use super::sentence::Sentence;
use crate::scoring::domain::pronunciation_scorer::{PronunciationScorer, ScoreBreakdown};
use crate::scoring::domain::score_tier::{is_completed, ScoreTier};
use crate::scoring::domain::word_sequence::WordSequence;
use crate::shared::constants::{MAX_SCORE, STORE_KEY_PRONUNCIATION_SCORES};
use crate::storage::domain::key_value_store::{KeyValueStore, StoreError};

#[derive(Error, Debug)]
pub enum PracticeError {
    #[error("unknown sentence: {0}")]
    UnknownSentence(String),
    #[error("no recording is active")]
    NoActiveRecording,
    #[error("sentence {0} has no text to compare against")]
    EmptyTargetText(String),
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
    #[error("failed to persist practice scores: {0}")]
    Store(#[from] StoreError),
}

/// What a record-button press did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingTransition {
    Started(String),
    /// The same sentence was pressed again while recording.
    Stopped(String),
    /// Another sentence was recording; its attempt is abandoned.
    Switched { from: String, to: String },
}

/// Result of one scored attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub sentence_id: String,
    pub score: u32,
    pub tier: ScoreTier,
    pub completed: bool,
    pub confidence: f32,
    pub is_new_best: bool,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionProgress {
    pub total: usize,
    pub attempted: usize,
    pub completed: usize,
    /// Mean of best scores over attempted sentences; 0 when none attempted.
    pub average_best: f64,
}

/// Pronunciation practice over an ordered list of sentences.
///
/// At most one sentence records at a time. Best scores are kept per
/// sentence id and can be persisted through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PracticeSession {
    sentences: Vec<Sentence>,
    active: Option<usize>,
    best_scores: HashMap<String, u32>,
}

impl PracticeSession {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self {
            sentences,
            active: None,
            best_scores: HashMap::new(),
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence(&self, id: &str) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.id == id)
    }

    pub fn active(&self) -> Option<&Sentence> {
        self.active.map(|idx| &self.sentences[idx])
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Press the record button for a sentence.
    pub fn toggle_recording(&mut self, id: &str) -> Result<RecordingTransition, PracticeError> {
        let idx = self
            .sentences
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| PracticeError::UnknownSentence(id.to_string()))?;

        let transition = match self.active {
            None => {
                self.active = Some(idx);
                RecordingTransition::Started(id.to_string())
            }
            Some(current) if current == idx => {
                self.active = None;
                RecordingTransition::Stopped(id.to_string())
            }
            Some(current) => {
                let from = self.sentences[current].id.clone();
                self.active = Some(idx);
                RecordingTransition::Switched {
                    from,
                    to: id.to_string(),
                }
            }
        };

        log::info!("Recording transition: {transition:?}");
        Ok(transition)
    }

    /// Scores a transcript against the recording sentence and ends the recording.
    pub fn complete_attempt(
        &mut self,
        speech: &RecognizedSpeech,
    ) -> Result<AttemptOutcome, PracticeError> {
        let idx = self.active.take().ok_or(PracticeError::NoActiveRecording)?;
        let sentence = &self.sentences[idx];

        if WordSequence::normalize(&sentence.text).is_empty() {
            return Err(PracticeError::EmptyTargetText(sentence.id.clone()));
        }

        let breakdown = PronunciationScorer::evaluate(&speech.text, &sentence.text);
        let score = breakdown.score;

        let previous = self.best_scores.get(&sentence.id).copied();
        let is_new_best = previous.map_or(true, |best| score > best);
        if is_new_best {
            self.best_scores.insert(sentence.id.clone(), score);
        }

        log::info!(
            "Sentence {}: scored {score}/100 (confidence {}%)",
            sentence.id,
            speech.confidence_percent()
        );

        Ok(AttemptOutcome {
            sentence_id: sentence.id.clone(),
            score,
            tier: ScoreTier::from_pronunciation_score(score),
            completed: is_completed(score),
            confidence: speech.confidence,
            is_new_best,
            breakdown,
        })
    }

    /// Handles a recognizer failure for the recording sentence.
    ///
    /// Aborts are swallowed and leave the session untouched, since they are
    /// raised when a recording is replaced by another. Any other error ends
    /// the recording and is handed back for display.
    pub fn fail_attempt(&mut self, error: RecognitionError) -> Option<RecognitionError> {
        if error.is_silent() {
            log::debug!("Recognition aborted; keeping session state");
            return None;
        }
        if let Some(idx) = self.active.take() {
            log::warn!("Recognition failed for {}: {error}", self.sentences[idx].id);
        }
        Some(error)
    }

    pub fn best_score(&self, id: &str) -> Option<u32> {
        self.best_scores.get(id).copied()
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.best_score(id).is_some_and(is_completed)
    }

    pub fn progress(&self) -> SessionProgress {
        let attempted: Vec<u32> = self
            .sentences
            .iter()
            .filter_map(|s| self.best_score(&s.id))
            .collect();
        let completed = attempted.iter().filter(|&&s| is_completed(s)).count();
        let average_best = if attempted.is_empty() {
            0.0
        } else {
            attempted.iter().map(|&s| s as f64).sum::<f64>() / attempted.len() as f64
        };

        SessionProgress {
            total: self.sentences.len(),
            attempted: attempted.len(),
            completed,
            average_best,
        }
    }

    pub fn save_scores(&self, store: &mut dyn KeyValueStore) -> Result<(), PracticeError> {
        let ordered: BTreeMap<&str, u32> = self
            .best_scores
            .iter()
            .map(|(id, score)| (id.as_str(), *score))
            .collect();
        let json = serde_json::to_string(&ordered).map_err(StoreError::from)?;
        store.set(STORE_KEY_PRONUNCIATION_SCORES, &json)?;
        Ok(())
    }

    /// Loads saved best scores, returning how many were applied.
    ///
    /// Entries for sentences not in this session are skipped. Unparseable
    /// saved data is logged and ignored.
    pub fn restore_scores(&mut self, store: &dyn KeyValueStore) -> Result<usize, PracticeError> {
        let Some(json) = store.get(STORE_KEY_PRONUNCIATION_SCORES)? else {
            return Ok(0);
        };
        let saved: HashMap<String, u32> = match serde_json::from_str(&json) {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Could not restore pronunciation scores: {e}");
                return Ok(0);
            }
        };

        let mut restored = 0;
        for (id, score) in saved {
            if self.sentence(&id).is_none() {
                continue;
            }
            let score = score.min(MAX_SCORE);
            let entry = self.best_scores.entry(id).or_insert(score);
            *entry = (*entry).max(score);
            restored += 1;
        }
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::infrastructure::memory_store::MemoryStore;
    use approx::assert_relative_eq;

    fn session() -> PracticeSession {
        PracticeSession::new(vec![
            Sentence::new("s1", "The weather is nice today."),
            Sentence::new("s2", "Could you help me, please?"),
            Sentence::new("s3", "I would like a cup of coffee."),
        ])
    }

    fn speech(text: &str) -> RecognizedSpeech {
        RecognizedSpeech::new(text, 0.9)
    }

    // --- recording transitions ---

    #[test]
    fn test_toggle_starts_then_stops() {
        let mut s = session();
        assert_eq!(
            s.toggle_recording("s1").unwrap(),
            RecordingTransition::Started("s1".to_string())
        );
        assert_eq!(s.active().unwrap().id, "s1");
        assert_eq!(
            s.toggle_recording("s1").unwrap(),
            RecordingTransition::Stopped("s1".to_string())
        );
        assert!(!s.is_recording());
    }

    #[test]
    fn test_toggle_other_sentence_switches() {
        let mut s = session();
        s.toggle_recording("s1").unwrap();
        let t = s.toggle_recording("s2").unwrap();
        assert_eq!(
            t,
            RecordingTransition::Switched {
                from: "s1".to_string(),
                to: "s2".to_string()
            }
        );
        assert_eq!(s.active().unwrap().id, "s2");
    }

    #[test]
    fn test_toggle_unknown_sentence_errors() {
        let mut s = session();
        let err = s.toggle_recording("nope").unwrap_err();
        assert!(matches!(err, PracticeError::UnknownSentence(id) if id == "nope"));
        assert!(!s.is_recording());
    }

    // --- attempts ---

    #[test]
    fn test_complete_attempt_scores_active_sentence() {
        let mut s = session();
        s.toggle_recording("s1").unwrap();
        let outcome = s
            .complete_attempt(&speech("the weather is nice today"))
            .unwrap();
        assert_eq!(outcome.sentence_id, "s1");
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.tier, ScoreTier::Excellent);
        assert!(outcome.completed);
        assert!(outcome.is_new_best);
        assert!(!s.is_recording());
        assert!(s.is_completed("s1"));
    }

    #[test]
    fn test_complete_without_recording_errors() {
        let mut s = session();
        let err = s.complete_attempt(&speech("hello")).unwrap_err();
        assert!(matches!(err, PracticeError::NoActiveRecording));
    }

    #[test]
    fn test_empty_target_text_errors() {
        let mut s = PracticeSession::new(vec![Sentence::new("blank", "?!")]);
        s.toggle_recording("blank").unwrap();
        let err = s.complete_attempt(&speech("hello")).unwrap_err();
        assert!(matches!(err, PracticeError::EmptyTargetText(id) if id == "blank"));
        assert!(!s.is_recording());
    }

    #[test]
    fn test_best_score_is_kept() {
        let mut s = session();
        s.toggle_recording("s1").unwrap();
        s.complete_attempt(&speech("the weather is nice today"))
            .unwrap();

        s.toggle_recording("s1").unwrap();
        let worse = s.complete_attempt(&speech("banana")).unwrap();
        assert!(!worse.is_new_best);
        assert_eq!(s.best_score("s1"), Some(100));
    }

    #[test]
    fn test_low_score_is_not_completed() {
        let mut s = session();
        s.toggle_recording("s2").unwrap();
        let outcome = s.complete_attempt(&speech("banana fruit")).unwrap();
        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.tier, ScoreTier::Poor);
        assert!(!outcome.completed);
        assert!(!s.is_completed("s2"));
    }

    #[test]
    fn test_abort_is_swallowed_and_keeps_recording() {
        let mut s = session();
        s.toggle_recording("s1").unwrap();
        assert_eq!(s.fail_attempt(RecognitionError::Aborted), None);
        assert!(s.is_recording());
    }

    #[test]
    fn test_failure_ends_recording() {
        let mut s = session();
        s.toggle_recording("s1").unwrap();
        let err = s.fail_attempt(RecognitionError::NoSpeech);
        assert_eq!(err, Some(RecognitionError::NoSpeech));
        assert!(!s.is_recording());
    }

    // --- progress ---

    #[test]
    fn test_progress() {
        let mut s = session();
        assert_eq!(s.progress().attempted, 0);
        assert_relative_eq!(s.progress().average_best, 0.0);

        s.toggle_recording("s1").unwrap();
        s.complete_attempt(&speech("the weather is nice today"))
            .unwrap();
        s.toggle_recording("s2").unwrap();
        s.complete_attempt(&speech("banana fruit")).unwrap();

        let p = s.progress();
        assert_eq!(p.total, 3);
        assert_eq!(p.attempted, 2);
        assert_eq!(p.completed, 1);
        assert_relative_eq!(p.average_best, 55.0);
    }

    // --- persistence ---

    #[test]
    fn test_scores_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut s = session();
        s.toggle_recording("s1").unwrap();
        s.complete_attempt(&speech("the weather is nice today"))
            .unwrap();
        s.save_scores(&mut store).unwrap();

        let mut fresh = session();
        assert_eq!(fresh.restore_scores(&store).unwrap(), 1);
        assert_eq!(fresh.best_score("s1"), Some(100));
        assert_eq!(fresh.best_score("s2"), None);
    }

    #[test]
    fn test_restore_skips_unknown_ids_and_clamps() {
        let mut store = MemoryStore::new();
        store
            .set(STORE_KEY_PRONUNCIATION_SCORES, r#"{"s2": 250, "gone": 80}"#)
            .unwrap();
        let mut s = session();
        assert_eq!(s.restore_scores(&store).unwrap(), 1);
        assert_eq!(s.best_score("s2"), Some(100));
        assert_eq!(s.best_score("gone"), None);
    }

    #[test]
    fn test_restore_ignores_malformed_data() {
        let mut store = MemoryStore::new();
        store
            .set(STORE_KEY_PRONUNCIATION_SCORES, "not json")
            .unwrap();
        let mut s = session();
        assert_eq!(s.restore_scores(&store).unwrap(), 0);
    }

    #[test]
    fn test_restore_with_nothing_saved() {
        let store = MemoryStore::new();
        let mut s = session();
        assert_eq!(s.restore_scores(&store).unwrap(), 0);
    }
}
