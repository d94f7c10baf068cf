use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::question::Question;
use super::quiz_result::{QuestionOutcome, QuizResult};
use crate::shared::constants::STORE_KEY_QUIZ_SELECTIONS;
use crate::storage::domain::key_value_store::{KeyValueStore, StoreError};

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    #[error("question {question_id} has {count} options, got option {option}")]
    InvalidOption {
        question_id: String,
        option: usize,
        count: usize,
    },
    #[error("quiz has already been submitted")]
    AlreadySubmitted,
    #[error("failed to persist quiz selections: {0}")]
    Store(#[from] StoreError),
}

/// One learner's pass through a listening quiz.
///
/// Selections are mirrored to the attached store (if any) after every
/// change so an interrupted quiz can be resumed with [`QuizSession::restore`].
/// A quiz can be submitted once; [`QuizSession::reset`] starts over.
pub struct QuizSession {
    questions: Vec<Question>,
    selections: HashMap<String, usize>,
    submitted: bool,
    store: Option<Box<dyn KeyValueStore>>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            selections: HashMap::new(),
            submitted: false,
            store: None,
        }
    }

    /// Rebuilds a session from selections saved in `store` and keeps the
    /// store attached. Saved entries that no longer fit a question are dropped.
    pub fn restore(questions: Vec<Question>, store: Box<dyn KeyValueStore>) -> Result<Self, QuizError> {
        let mut session = Self::new(questions);

        if let Some(json) = store.get(STORE_KEY_QUIZ_SELECTIONS)? {
            match serde_json::from_str::<HashMap<String, usize>>(&json) {
                Ok(saved) => {
                    for (id, option) in saved {
                        let fits = session
                            .question(&id)
                            .is_some_and(|q| q.has_option(option));
                        if fits {
                            session.selections.insert(id, option);
                        }
                    }
                    log::info!("Restored {} quiz selections", session.selections.len());
                }
                Err(e) => log::warn!("Could not restore quiz selections: {e}"),
            }
        }

        session.store = Some(store);
        Ok(session)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn selection(&self, id: &str) -> Option<usize> {
        self.selections.get(id).copied()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn answered(&self) -> usize {
        self.selections.len()
    }

    /// Ids of questions without a selection, in quiz order.
    pub fn unanswered(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|q| !self.selections.contains_key(&q.id))
            .map(|q| q.id.as_str())
            .collect()
    }

    pub fn select_answer(&mut self, question_id: &str, option: usize) -> Result<(), QuizError> {
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        let question = self
            .question(question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        if !question.has_option(option) {
            return Err(QuizError::InvalidOption {
                question_id: question_id.to_string(),
                option,
                count: question.options.len(),
            });
        }

        self.selections.insert(question_id.to_string(), option);
        self.save_selections()
    }

    /// Grades the quiz. Unanswered questions count as incorrect.
    pub fn submit(&mut self) -> Result<QuizResult, QuizError> {
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }

        let outcomes = self
            .questions
            .iter()
            .map(|q| QuestionOutcome {
                question_id: q.id.clone(),
                selected: self.selection(&q.id),
                correct_option: q.correct_option,
            })
            .collect();
        let result = QuizResult { outcomes };

        self.submitted = true;
        self.clear_saved()?;

        log::info!(
            "Quiz results: {}/{} ({:.1}%)",
            result.correct(),
            result.total(),
            result.percentage()
        );
        Ok(result)
    }

    pub fn reset(&mut self) -> Result<(), QuizError> {
        self.selections.clear();
        self.submitted = false;
        self.clear_saved()
    }

    fn save_selections(&mut self) -> Result<(), QuizError> {
        if let Some(store) = self.store.as_mut() {
            let ordered: BTreeMap<&String, &usize> = self.selections.iter().collect();
            let json = serde_json::to_string(&ordered).map_err(StoreError::from)?;
            store.set(STORE_KEY_QUIZ_SELECTIONS, &json)?;
        }
        Ok(())
    }

    fn clear_saved(&mut self) -> Result<(), QuizError> {
        if let Some(store) = self.store.as_mut() {
            store.remove(STORE_KEY_QUIZ_SELECTIONS)?;
        }
        Ok(())
    }
}
