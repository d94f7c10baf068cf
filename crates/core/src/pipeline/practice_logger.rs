use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for practice orchestration events.
///
/// Keeps use cases independent of where events end up (terminal, log
/// crate, test assertions).
pub trait PracticeLogger: Send {
    /// Report sentence-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one attempt.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. score, recognizer confidence).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards all events.
pub struct NullPracticeLogger;

impl PracticeLogger for NullPracticeLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that forwards to the `log` crate and keeps per-stage timings and
/// metrics for an end-of-session summary.
pub struct StdoutPracticeLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    attempts: usize,
    total_sentences: usize,
    messages: Vec<String>,
}

impl StdoutPracticeLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            attempts: 0,
            total_sentences: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Practice summary ({} attempts over {} sentences, {elapsed_s:.1}s total):",
            self.attempts, self.total_sentences
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = average(durations);
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:8.1}ms  total {total_ms:9.0}ms"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let best = values.iter().copied().fold(f64::MIN, f64::max);
            lines.push(format!(
                "  {name}: avg {:.1}  best {best:.1}",
                average(values)
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl Default for StdoutPracticeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PracticeLogger for StdoutPracticeLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.attempts += 1;
        self.total_sentences = total;
        log::info!("Sentence {current}/{total}");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
