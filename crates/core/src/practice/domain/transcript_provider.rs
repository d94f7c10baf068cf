use super::recognition_error::RecognitionError;
use super::recognized_speech::RecognizedSpeech;

/// Domain interface for acquiring one finalized transcript.
///
/// Implementations own the recognizer lifecycle (permissions, continuous vs
/// single-shot capture); callers only see the final text and confidence.
pub trait TranscriptProvider: Send {
    fn request_transcript(&mut self) -> Result<RecognizedSpeech, RecognitionError>;
}
