//! Save-status observable shared between the session and in-flight save
//! tasks.
//!
//! Saves are not serialized against each other: two can be in flight and
//! their responses can arrive out of order. Each request therefore takes a
//! monotonically increasing sequence number at schedule time, and a
//! completion (or its delayed idle-reset) only lands while its own number
//! is still the newest one observed. The remote itself stays
//! last-writer-wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Observable outcome of the most recent save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Error,
}

/// How long a terminal status stays visible before reverting to idle.
const SUCCESS_CLEAR_AFTER: Duration = Duration::from_secs(2);
const ERROR_CLEAR_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct SaveCell {
    seq: u64,
    status: SaveStatus,
    error: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct SaveTracker {
    next_seq: AtomicU64,
    cell: Mutex<SaveCell>,
}

impl SaveTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claims the next sequence number and marks the observable as saving.
    ///
    /// Must be called synchronously at schedule time so numbers follow
    /// intent order, not task scheduling order.
    pub(crate) fn begin(&self) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let mut cell = self.cell.lock().unwrap();
        cell.seq = seq;
        cell.status = SaveStatus::Saving;
        cell.error = None;
        seq
    }

    /// Records the outcome of save `seq`, unless a newer save has begun
    /// since (then the result is dropped and `None` comes back).
    ///
    /// On success returns how long the caller should wait before invoking
    /// [`clear`](SaveTracker::clear).
    pub(crate) fn finish(&self, seq: u64, result: Result<(), String>) -> Option<Duration> {
        let mut cell = self.cell.lock().unwrap();
        if cell.seq != seq {
            return None; // a newer save owns the observable now
        }
        match result {
            Ok(()) => {
                cell.status = SaveStatus::Success;
                cell.error = None;
                Some(SUCCESS_CLEAR_AFTER)
            }
            Err(message) => {
                cell.status = SaveStatus::Error;
                cell.error = Some(message);
                Some(ERROR_CLEAR_AFTER)
            }
        }
    }

    /// Reverts save `seq`'s terminal status to idle, unless superseded.
    pub(crate) fn clear(&self, seq: u64) {
        let mut cell = self.cell.lock().unwrap();
        if cell.seq == seq && cell.status != SaveStatus::Saving {
            cell.status = SaveStatus::Idle;
            cell.error = None;
        }
    }

    pub(crate) fn status(&self) -> SaveStatus {
        self.cell.lock().unwrap().status
    }

    pub(crate) fn last_error(&self) -> Option<String> {
        self.cell.lock().unwrap().error.clone()
    }
}
