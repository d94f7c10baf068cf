use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::practice::domain::sentence::Sentence;
use crate::quiz::domain::question::Question;
use crate::scoring::domain::word_sequence::WordSequence;

#[derive(Error, Debug)]
pub enum LessonError {
    #[error("failed to read lesson {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse lesson: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sentence ids must be non-empty")]
    EmptySentenceId,
    #[error("duplicate sentence id: {0}")]
    DuplicateSentence(String),
    #[error("sentence {0} has no words")]
    EmptySentence(String),
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),
    #[error("question {id} marks option {correct} correct but has {count} options")]
    CorrectOptionOutOfRange {
        id: String,
        correct: usize,
        count: usize,
    },
}

/// A lesson page: sentences to pronounce and listening questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Lesson {
    pub fn load(path: &Path) -> Result<Self, LessonError> {
        let data = fs::read_to_string(path).map_err(|source| LessonError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self, LessonError> {
        let lesson: Lesson = serde_json::from_str(json)?;
        lesson.validate()?;
        Ok(lesson)
    }

    pub fn validate(&self) -> Result<(), LessonError> {
        let mut seen = HashSet::new();
        for sentence in &self.sentences {
            if sentence.id.trim().is_empty() {
                return Err(LessonError::EmptySentenceId);
            }
            if !seen.insert(sentence.id.as_str()) {
                return Err(LessonError::DuplicateSentence(sentence.id.clone()));
            }
            if WordSequence::normalize(&sentence.text).is_empty() {
                return Err(LessonError::EmptySentence(sentence.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(LessonError::DuplicateQuestion(question.id.clone()));
            }
            if !question.has_option(question.correct_option) {
                return Err(LessonError::CorrectOptionOutOfRange {
                    id: question.id.clone(),
                    correct: question.correct_option,
                    count: question.options.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = r#"{
        "title": "At the cafe",
        "sentences": [
            {"id": "s1", "text": "I would like a cup of coffee."},
            {"id": "s2", "text": "Can I have the bill, please?"}
        ],
        "questions": [
            {"id": "q1", "prompt": "What does she order?", "options": ["Tea", "Coffee"], "correct_option": 1}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let lesson = Lesson::from_json(LESSON).unwrap();
        assert_eq!(lesson.title, "At the cafe");
        assert_eq!(lesson.sentences.len(), 2);
        assert_eq!(lesson.sentences[1].id, "s2");
        assert_eq!(lesson.questions[0].correct_option, 1);
    }

    #[test]
    fn test_sections_are_optional() {
        let lesson = Lesson::from_json(r#"{"sentences": [{"id": "a", "text": "Hi"}]}"#).unwrap();
        assert!(lesson.title.is_empty());
        assert!(lesson.questions.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.json");
        fs::write(&path, LESSON).unwrap();
        let lesson = Lesson::load(&path).unwrap();
        assert_eq!(lesson.sentences.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Lesson::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LessonError::Read { .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Lesson::from_json("{"),
            Err(LessonError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_sentence_rejected() {
        let json = r#"{"sentences": [{"id": "a", "text": "one"}, {"id": "a", "text": "two"}]}"#;
        assert!(matches!(
            Lesson::from_json(json),
            Err(LessonError::DuplicateSentence(id)) if id == "a"
        ));
    }

    #[test]
    fn test_blank_sentence_id_rejected() {
        let json = r#"{"sentences": [{"id": " ", "text": "one"}]}"#;
        assert!(matches!(
            Lesson::from_json(json),
            Err(LessonError::EmptySentenceId)
        ));
    }

    #[test]
    fn test_punctuation_only_sentence_rejected() {
        let json = r#"{"sentences": [{"id": "a", "text": "..."}]}"#;
        assert!(matches!(
            Lesson::from_json(json),
            Err(LessonError::EmptySentence(id)) if id == "a"
        ));
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let json = r#"{"questions": [
            {"id": "q", "prompt": "?", "options": ["a"], "correct_option": 0},
            {"id": "q", "prompt": "?", "options": ["a"], "correct_option": 0}
        ]}"#;
        assert!(matches!(
            Lesson::from_json(json),
            Err(LessonError::DuplicateQuestion(_))
        ));
    }

    #[test]
    fn test_correct_option_out_of_range_rejected() {
        let json = r#"{"questions": [
            {"id": "q", "prompt": "?", "options": ["a", "b"], "correct_option": 2}
        ]}"#;
        assert!(matches!(
            Lesson::from_json(json),
            Err(LessonError::CorrectOptionOutOfRange { count: 2, .. })
        ));
    }
}
