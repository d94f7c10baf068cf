use serde::{Deserialize, Serialize};

/// A reference sentence the learner is asked to pronounce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: String,
    pub text: String,
}

impl Sentence {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_str_and_string() {
        let s = Sentence::new("s1", String::from("Good morning"));
        assert_eq!(s.id, "s1");
        assert_eq!(s.text, "Good morning");
    }

    #[test]
    fn test_deserialize_from_json() {
        let s: Sentence = serde_json::from_str(r#"{"id": "s2", "text": "How are you?"}"#).unwrap();
        assert_eq!(s, Sentence::new("s2", "How are you?"));
    }
}
