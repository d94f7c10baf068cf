use std::io::BufRead;

use crate::practice::domain::recognition_error::RecognitionError;
use crate::practice::domain::recognized_speech::RecognizedSpeech;
use crate::practice::domain::transcript_provider::TranscriptProvider;

/// Confidence reported for typed transcripts.
pub const TYPED_CONFIDENCE: f32 = 1.0;

/// Transcript provider that reads one line per request.
///
/// Stands in for a microphone when the learner types (or pipes in) what a
/// recognizer would have heard. A blank line is reported as no speech and
/// end of input as [`RecognitionError::EndOfInput`].
pub struct LineTranscriptProvider<R> {
    reader: R,
}

impl<R: BufRead + Send> LineTranscriptProvider<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead + Send> TranscriptProvider for LineTranscriptProvider<R> {
    fn request_transcript(&mut self) -> Result<RecognizedSpeech, RecognitionError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|e| {
            log::warn!("Failed to read transcript: {e}");
            RecognitionError::AudioCapture
        })?;

        if read == 0 {
            return Err(RecognitionError::EndOfInput);
        }

        let text = line.trim();
        if text.is_empty() {
            return Err(RecognitionError::NoSpeech);
        }

        Ok(RecognizedSpeech::new(text, TYPED_CONFIDENCE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_one_line_per_request() {
        let mut provider = LineTranscriptProvider::new(Cursor::new("hello there\nsecond line\n"));
        assert_eq!(provider.request_transcript().unwrap().text, "hello there");
        assert_eq!(provider.request_transcript().unwrap().text, "second line");
        assert_eq!(
            provider.request_transcript().unwrap_err(),
            RecognitionError::EndOfInput
        );
    }

    #[test]
    fn test_blank_line_is_no_speech() {
        let mut provider = LineTranscriptProvider::new(Cursor::new("   \nok\n"));
        assert_eq!(
            provider.request_transcript().unwrap_err(),
            RecognitionError::NoSpeech
        );
        assert_eq!(provider.request_transcript().unwrap().text, "ok");
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut provider = LineTranscriptProvider::new(Cursor::new("good night"));
        let speech = provider.request_transcript().unwrap();
        assert_eq!(speech.text, "good night");
        assert_eq!(speech.confidence_percent(), 100);
    }
}
