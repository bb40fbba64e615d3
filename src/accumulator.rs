//! Shared result/progress state for one search.
//!
//! The accumulator is the single source of truth the view layer renders
//! from. It is owned by whichever transport drives the search; the view
//! only ever sees `&AccumulatorState` through the observer callback. Items
//! are kept in arrival order, progress counters never move backwards, and
//! `reset()` is the only operation permitted between searches.

use serde::Serialize;

use crate::models::{ResultItem, StreamRecord};
use crate::progress::SearchObserver;

/// Coarse lifecycle of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    Idle,
    Streaming,
    Completed,
    Failed,
}

impl SearchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchPhase::Idle => "idle",
            SearchPhase::Streaming => "streaming",
            SearchPhase::Completed => "completed",
            SearchPhase::Failed => "failed",
        }
    }
}

/// Latest reported transfer counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

/// The state consumed read-only by the view layer.
#[derive(Debug, Clone, Serialize)]
pub struct AccumulatorState {
    pub items: Vec<ResultItem>,
    pub progress: Progress,
    pub phase: SearchPhase,
}

impl AccumulatorState {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            progress: Progress::default(),
            phase: SearchPhase::Idle,
        }
    }
}

/// What to do when the service sends two items with the same id — a
/// protocol violation, accepted defensively either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep both rows (the historical behavior).
    Append,
    /// Replace the earlier row in place, preserving its position.
    Replace,
}

/// Ordered results + progress counters for one search, with an observer
/// notified after every mutation.
pub struct SearchAccumulator {
    state: AccumulatorState,
    policy: DuplicatePolicy,
    observer: Box<dyn SearchObserver>,
}

impl SearchAccumulator {
    pub fn new(policy: DuplicatePolicy, observer: Box<dyn SearchObserver>) -> Self {
        Self {
            state: AccumulatorState::new(),
            policy,
            observer,
        }
    }

    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    pub fn phase(&self) -> SearchPhase {
        self.state.phase
    }

    /// Apply one decoded record: append its item if present, then take the
    /// reported counters. One observer notification for the whole record.
    pub fn apply(&mut self, record: StreamRecord) {
        if let Some(item) = record.item {
            self.push_item(item);
        }
        self.update_progress(record.completed, record.total);
        self.notify();
    }

    pub fn append(&mut self, item: ResultItem) {
        self.push_item(item);
        self.notify();
    }

    pub fn set_progress(&mut self, completed: u64, total: u64) {
        self.update_progress(completed, total);
        self.notify();
    }

    pub fn set_phase(&mut self, phase: SearchPhase) {
        self.state.phase = phase;
        self.notify();
    }

    /// Atomically clear items and zero progress before a new search run.
    /// Prevents any visible mixing of two searches' results.
    pub fn reset(&mut self) {
        self.state = AccumulatorState::new();
        self.notify();
    }

    fn push_item(&mut self, item: ResultItem) {
        let existing = self.state.items.iter().position(|i| i.id == item.id);
        match (self.policy, existing) {
            (DuplicatePolicy::Replace, Some(pos)) => {
                tracing::warn!(id = %item.id, "duplicate item id, replacing earlier row");
                self.state.items[pos] = item;
            }
            (DuplicatePolicy::Append, Some(_)) => {
                tracing::warn!(id = %item.id, "duplicate item id, keeping both rows");
                self.state.items.push(item);
            }
            (_, None) => self.state.items.push(item),
        }
    }

    /// Counters only move forward: `total` never decreases once positive,
    /// and `completed` is never observed to go backwards within a search.
    fn update_progress(&mut self, completed: u64, total: u64) {
        self.state.progress.completed = self.state.progress.completed.max(completed);
        self.state.progress.total = self.state.progress.total.max(total);
    }

    fn notify(&self) {
        self.observer.on_change(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;
    use crate::progress::NoProgress;
    use std::sync::{Arc, Mutex};

    fn item(id: &str) -> ResultItem {
        ResultItem {
            id: id.to_string(),
            title: format!("title {}", id),
            body_text: "body".to_string(),
            summary_text: "summary".to_string(),
            year: None,
            origin: None,
        }
    }

    fn record(completed: u64, total: u64, item_id: Option<&str>) -> StreamRecord {
        StreamRecord {
            status: RecordStatus::Processing,
            total,
            completed,
            item: item_id.map(item),
        }
    }

    fn accumulator(policy: DuplicatePolicy) -> SearchAccumulator {
        SearchAccumulator::new(policy, Box::new(NoProgress))
    }

    /// Records `(items, completed, total)` after every notification.
    struct Recording(Arc<Mutex<Vec<(usize, u64, u64)>>>);

    impl SearchObserver for Recording {
        fn on_change(&self, state: &AccumulatorState) {
            self.0.lock().unwrap().push((
                state.items.len(),
                state.progress.completed,
                state.progress.total,
            ));
        }
    }

    #[test]
    fn test_apply_appends_item_and_progress() {
        let mut acc = accumulator(DuplicatePolicy::Append);
        acc.apply(record(1, 2, Some("A")));
        assert_eq!(acc.state().items.len(), 1);
        assert_eq!(acc.state().progress, Progress { completed: 1, total: 2 });
    }

    #[test]
    fn test_progress_tick_without_item() {
        let mut acc = accumulator(DuplicatePolicy::Append);
        acc.apply(record(0, 7, None));
        assert!(acc.state().items.is_empty());
        assert_eq!(acc.state().progress.total, 7);
    }

    #[test]
    fn test_counters_never_move_backwards() {
        let mut acc = accumulator(DuplicatePolicy::Append);
        acc.set_progress(3, 10);
        acc.set_progress(2, 4);
        assert_eq!(acc.state().progress, Progress { completed: 3, total: 10 });
        acc.set_progress(5, 10);
        assert_eq!(acc.state().progress.completed, 5);
    }

    #[test]
    fn test_duplicate_append_keeps_both_rows() {
        let mut acc = accumulator(DuplicatePolicy::Append);
        acc.append(item("A"));
        acc.append(item("A"));
        assert_eq!(acc.state().items.len(), 2);
    }

    #[test]
    fn test_duplicate_replace_preserves_position() {
        let mut acc = accumulator(DuplicatePolicy::Replace);
        acc.append(item("A"));
        acc.append(item("B"));
        let mut updated = item("A");
        updated.summary_text = "revised".to_string();
        acc.append(updated);
        assert_eq!(acc.state().items.len(), 2);
        assert_eq!(acc.state().items[0].id, "A");
        assert_eq!(acc.state().items[0].summary_text, "revised");
        assert_eq!(acc.state().items[1].id, "B");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut acc = accumulator(DuplicatePolicy::Append);
        acc.set_phase(SearchPhase::Streaming);
        acc.apply(record(2, 3, Some("A")));
        acc.reset();
        assert!(acc.state().items.is_empty());
        assert_eq!(acc.state().progress, Progress::default());
        assert_eq!(acc.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_observer_sees_every_mutation() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut acc = SearchAccumulator::new(
            DuplicatePolicy::Append,
            Box::new(Recording(Arc::clone(&log))),
        );
        acc.set_phase(SearchPhase::Streaming);
        acc.apply(record(1, 2, Some("A")));
        acc.apply(record(2, 2, None));
        acc.set_phase(SearchPhase::Completed);
        let log = log.lock().unwrap();
        // One notification per mutation; apply counts as one.
        assert_eq!(log.len(), 4);
        assert_eq!(log[1], (1, 1, 2));
        assert_eq!(log[2], (1, 2, 2));
    }

    #[test]
    fn test_items_preserve_arrival_order() {
        let mut acc = accumulator(DuplicatePolicy::Append);
        for id in ["C", "A", "B"] {
            acc.append(item(id));
        }
        let ids: Vec<&str> = acc.state().items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }
}
