use std::time::Instant;

use crate::pipeline::practice_logger::PracticeLogger;
use crate::practice::domain::practice_session::{AttemptOutcome, PracticeError, PracticeSession};
use crate::practice::domain::transcript_provider::TranscriptProvider;

/// Runs one pronunciation attempt: record, transcribe, score.
pub struct PracticeSentenceUseCase {
    provider: Box<dyn TranscriptProvider>,
    logger: Box<dyn PracticeLogger>,
}

impl PracticeSentenceUseCase {
    pub fn new(provider: Box<dyn TranscriptProvider>, logger: Box<dyn PracticeLogger>) -> Self {
        Self { provider, logger }
    }

    /// Attempts `sentence_id` within `session`.
    ///
    /// Returns `Ok(None)` when the recognizer aborted; the session then keeps
    /// the sentence recording so the caller can retry. Other recognizer
    /// failures end the recording and surface as [`PracticeError::Recognition`].
    pub fn run(
        &mut self,
        session: &mut PracticeSession,
        sentence_id: &str,
    ) -> Result<Option<AttemptOutcome>, PracticeError> {
        // 1. Make this sentence the active recording
        let already_active = session.active().is_some_and(|s| s.id == sentence_id);
        if !already_active {
            session.toggle_recording(sentence_id)?;
        }

        let total = session.sentences().len();
        if let Some(position) = session.sentences().iter().position(|s| s.id == sentence_id) {
            self.logger.progress(position + 1, total);
        }

        // 2. Acquire a transcript
        let t0 = Instant::now();
        let transcript = self.provider.request_transcript();
        self.logger
            .timing("transcribe", t0.elapsed().as_secs_f64() * 1000.0);

        let speech = match transcript {
            Ok(speech) => speech,
            Err(e) => {
                return match session.fail_attempt(e) {
                    Some(err) => {
                        self.logger
                            .info(&format!("Recognition failed for {sentence_id}: {err}"));
                        Err(err.into())
                    }
                    None => Ok(None),
                };
            }
        };

        // 3. Score against the target sentence
        let t0 = Instant::now();
        let outcome = session.complete_attempt(&speech)?;
        self.logger
            .timing("score", t0.elapsed().as_secs_f64() * 1000.0);
        self.logger.metric("score", outcome.score as f64);
        self.logger
            .metric("confidence", speech.confidence_percent() as f64);
        self.logger.info(&format!(
            "Sentence {sentence_id}: {}/100 ({})",
            outcome.score,
            outcome.tier.label()
        ));

        Ok(Some(outcome))
    }

    /// Emits the logger's end-of-session summary.
    pub fn finish(&self) {
        self.logger.summary();
    }
}
