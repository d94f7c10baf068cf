/// A finalized best-guess transcription from a speech recognizer.
///
/// `confidence` is informational only; scoring never reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedSpeech {
    pub text: String,
    pub confidence: f32,
}

impl RecognizedSpeech {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_confidence_percent_rounds() {
        let speech = RecognizedSpeech::new("hello", 0.876);
        assert_eq!(speech.confidence_percent(), 88);
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_relative_eq!(RecognizedSpeech::new("a", 1.7).confidence, 1.0);
        assert_relative_eq!(RecognizedSpeech::new("a", -0.2).confidence, 0.0);
    }
}
