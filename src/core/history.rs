//! Bounded log of installed transitions.
//!
//! The machine appends one record per transition. Old records fall off the
//! front once the configured capacity is reached, so memory use stays flat
//! in long-running control loops.

use serde::Serialize;
use std::collections::VecDeque;

/// Record of a single installed transition.
///
/// # Example
///
/// ```rust
/// use tickset::core::TransitionRecord;
///
/// let record = TransitionRecord {
///     tick: 12,
///     from: "Delay",
///     to: "Throttle",
/// };
/// assert_eq!(record.tick, 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    /// Tick counter value when the transition was installed
    pub tick: u64,
    /// Name of the state that was replaced
    pub from: &'static str,
    /// Name of the state that was installed
    pub to: &'static str,
}

/// Ring buffer of the most recent transitions.
///
/// A capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use tickset::core::{TransitionLog, TransitionRecord};
///
/// let mut log = TransitionLog::with_capacity(2);
/// log.record(TransitionRecord { tick: 1, from: "A", to: "B" });
/// log.record(TransitionRecord { tick: 2, from: "B", to: "C" });
/// log.record(TransitionRecord { tick: 3, from: "C", to: "D" });
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.path(), vec!["B", "C", "D"]);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct TransitionLog {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
}

impl TransitionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::new(),
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> + '_ {
        self.records.iter()
    }

    /// States traversed: the source of the oldest retained record, then the
    /// destination of every record.
    pub fn path(&self) -> Vec<&'static str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
