//! Live search progress reporting.
//!
//! The accumulator notifies an observer on every mutation, and the view
//! layer renders from the state it is handed — the core never depends on
//! how (or whether) the state is displayed. Progress is emitted on
//! **stderr** so stdout stays parseable for scripts.

use std::io::Write;

use crate::accumulator::AccumulatorState;

/// Read-only view seam: called after every accumulator mutation with the
/// current state. Implementations render; they never mutate.
pub trait SearchObserver: Send + Sync {
    fn on_change(&self, state: &AccumulatorState);
}

/// Human-friendly progress on stderr:
/// "search  streaming  3 / 10  (2 summaries)".
pub struct HumanProgress;

impl SearchObserver for HumanProgress {
    fn on_change(&self, state: &AccumulatorState) {
        let noun = if state.items.len() == 1 {
            "summary"
        } else {
            "summaries"
        };
        let line = format!(
            "search  {}  {} / {}  ({} {})\n",
            state.phase.as_str(),
            state.progress.completed,
            state.progress.total,
            state.items.len(),
            noun,
        );
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl SearchObserver for JsonProgress {
    fn on_change(&self, state: &AccumulatorState) {
        let obj = serde_json::json!({
            "event": "progress",
            "phase": state.phase.as_str(),
            "completed": state.progress.completed,
            "total": state.progress.total,
            "items": state.items.len(),
        });
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op observer when progress is disabled.
pub struct NoProgress;

impl SearchObserver for NoProgress {
    fn on_change(&self, _state: &AccumulatorState) {}
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build an observer for this mode. Caller attaches it to the
    /// accumulator for the duration of one search.
    pub fn observer(&self) -> Box<dyn SearchObserver> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(HumanProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
