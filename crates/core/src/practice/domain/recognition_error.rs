use thiserror::Error;

/// Failures reported by a speech recognition engine.
///
/// Variants mirror the error codes browser recognizers emit, plus
/// `EndOfInput` for providers backed by a finite source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("microphone access was denied; allow it and try again")]
    NotAllowed,
    #[error("no microphone found; check the audio device")]
    AudioCapture,
    #[error("network error during recognition; check the connection and retry")]
    Network,
    #[error("no speech detected; speak louder and more clearly")]
    NoSpeech,
    #[error("speech recognition service was denied; try again")]
    ServiceNotAllowed,
    #[error("recognition aborted")]
    Aborted,
    #[error("transcript source closed")]
    EndOfInput,
    #[error("speech recognition error: {0}")]
    Other(String),
}

impl RecognitionError {
    /// Maps a recognizer error code (e.g. `"no-speech"`) to a variant.
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" => RecognitionError::NotAllowed,
            "audio-capture" => RecognitionError::AudioCapture,
            "network" => RecognitionError::Network,
            "no-speech" => RecognitionError::NoSpeech,
            "service-not-allowed" => RecognitionError::ServiceNotAllowed,
            "aborted" => RecognitionError::Aborted,
            other => RecognitionError::Other(other.to_string()),
        }
    }

    /// Aborts happen when one recording replaces another and are not shown.
    pub fn is_silent(&self) -> bool {
        matches!(self, RecognitionError::Aborted)
    }

    /// Warnings ask the learner to retry; everything else is an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, RecognitionError::NoSpeech)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not-allowed", RecognitionError::NotAllowed)]
    #[case("audio-capture", RecognitionError::AudioCapture)]
    #[case("network", RecognitionError::Network)]
    #[case("no-speech", RecognitionError::NoSpeech)]
    #[case("service-not-allowed", RecognitionError::ServiceNotAllowed)]
    #[case("aborted", RecognitionError::Aborted)]
    #[case("bad-grammar", RecognitionError::Other("bad-grammar".to_string()))]
    fn test_from_code(#[case] code: &str, #[case] expected: RecognitionError) {
        assert_eq!(RecognitionError::from_code(code), expected);
    }

    #[test]
    fn test_only_abort_is_silent() {
        assert!(RecognitionError::Aborted.is_silent());
        assert!(!RecognitionError::NoSpeech.is_silent());
        assert!(!RecognitionError::EndOfInput.is_silent());
    }

    #[test]
    fn test_no_speech_is_warning() {
        assert!(RecognitionError::NoSpeech.is_warning());
        assert!(!RecognitionError::Network.is_warning());
    }

    #[test]
    fn test_other_message_includes_code() {
        let err = RecognitionError::Other("language-not-supported".to_string());
        assert!(err.to_string().contains("language-not-supported"));
    }
}
