/// An ordered list of normalized words.
///
/// Normalization lowercases the text, strips every character that is neither
/// a word character (alphanumeric or `_`) nor whitespace, then splits on
/// whitespace. Letters outside ASCII count as word characters, so accented
/// words stay whole. Used for both the recognized transcript and the target
/// sentence.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WordSequence {
    words: Vec<String>,
}

impl WordSequence {
    pub fn normalize(text: &str) -> Self {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();

        Self {
            words: cleaned.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl std::fmt::Display for WordSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}
