//! Bounded, step-indexed history of grid snapshots.
//!
//! The ledger lets the controller step backward and forward through
//! generations it has already computed without recomputing them. It is
//! immutable: `record` returns a new ledger, following the same
//! record-returns-new-value shape as the rest of the core.

use super::grid::Grid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default ledger capacity.
pub const MAX_HISTORY: usize = 30;

/// Snapshot of the grid at a single step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Generation index this snapshot belongs to
    pub step: u64,
    /// When the snapshot was recorded
    pub timestamp: DateTime<Utc>,
    /// Deep copy of the grid at `step`
    pub grid: Grid,
}

impl HistoryEntry {
    /// Entry stamped with the current time.
    pub fn now(step: u64, grid: Grid) -> Self {
        Self {
            step,
            timestamp: Utc::now(),
            grid,
        }
    }
}

/// Ordered, capacity-bounded record of [`HistoryEntry`] values.
///
/// Entries are kept in increasing `step` order and each step appears at most
/// once. Recording a step that is already present replaces its snapshot in
/// place. When the ledger is full, the entry with the lowest step is evicted
/// before the new one is inserted, so the entry just recorded is always
/// retrievable.
///
/// Deserialized ledgers are normalized the same way: capacity is raised to
/// at least 1 and the stored entries are re-recorded in order, so duplicate
/// steps collapse to the last one and only `capacity` entries survive.
///
/// # Example
///
/// ```rust
/// use cellsim::core::{Grid, HistoryLedger};
///
/// let grid = Grid::empty(2, 2).unwrap();
/// let ledger = HistoryLedger::new(3);
/// let ledger = (1..=4).fold(ledger, |ledger, step| ledger.record(step, grid.clone()));
///
/// assert_eq!(ledger.steps(), vec![2, 3, 4]);
/// assert!(ledger.find(1).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLedger")]
pub struct HistoryLedger {
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
struct RawLedger {
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl From<RawLedger> for HistoryLedger {
    fn from(raw: RawLedger) -> Self {
        raw.entries
            .into_iter()
            .fold(Self::new(raw.capacity), |ledger, entry| ledger.record_entry(entry))
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl HistoryLedger {
    /// Create an empty ledger. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Record a snapshot for `step` stamped with the current time.
    pub fn record(&self, step: u64, grid: Grid) -> Self {
        self.record_entry(HistoryEntry::now(step, grid))
    }

    /// Record a prepared entry, returning a new ledger.
    ///
    /// This does not mutate the existing ledger.
    pub fn record_entry(&self, entry: HistoryEntry) -> Self {
        let mut entries = self.entries.clone();

        if let Some(existing) = entries.iter_mut().find(|e| e.step == entry.step) {
            *existing = entry;
            return Self {
                capacity: self.capacity,
                entries,
            };
        }

        let overflow = (entries.len() + 1).saturating_sub(self.capacity);
        entries.drain(..overflow.min(entries.len()));
        let at = entries.partition_point(|e| e.step < entry.step);
        entries.insert(at, entry);

        Self {
            capacity: self.capacity,
            entries,
        }
    }

    /// Exact-match lookup by step. `None` when evicted or never recorded.
    pub fn find(&self, step: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.step == step)
    }

    /// Grid recorded for `step`, if any.
    pub fn grid_at(&self, step: u64) -> Option<&Grid> {
        self.find(step).map(|e| &e.grid)
    }

    pub fn contains(&self, step: u64) -> bool {
        self.find(step).is_some()
    }

    /// All retained entries in increasing step order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Steps currently retrievable.
    pub fn steps(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.step).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest_step(&self) -> Option<u64> {
        self.entries.first().map(|e| e.step)
    }

    pub fn latest_step(&self) -> Option<u64> {
        self.entries.last().map(|e| e.step)
    }

    /// Time between the earliest and latest recorded timestamps.
    ///
    /// Returns `None` for an empty ledger.
    pub fn span(&self) -> Option<Duration> {
        let earliest = self.entries.iter().map(|e| e.timestamp).min()?;
        let latest = self.entries.iter().map(|e| e.timestamp).max()?;
        latest.signed_duration_since(earliest).to_std().ok()
    }
}
