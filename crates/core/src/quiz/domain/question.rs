use serde::{Deserialize, Serialize};

/// A multiple-choice listening-comprehension question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_option: usize,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }

    pub fn has_option(&self, option: usize) -> bool {
        option < self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            id: "q1".to_string(),
            prompt: "Where does the speaker work?".to_string(),
            options: vec!["Bank".into(), "Hospital".into(), "School".into()],
            correct_option: 1,
        }
    }

    #[test]
    fn test_is_correct() {
        let q = question();
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_has_option() {
        let q = question();
        assert!(q.has_option(2));
        assert!(!q.has_option(3));
    }
}
