//! Shared sample buffers
//!
//! Two independent accumulators, each behind exactly one coarse mutex:
//! - `PointBuffer`: capacity-bounded, append-only point store with a sticky
//!   full state (once full, always full)
//! - `MotionBuffer`: unbounded, append-only motion store
//!
//! Both expose a narrow interface (`try_append` / `append`, length probes,
//! `lock_for_export`) instead of raw shared state. The capacity check and the
//! insert of `try_append` form a single critical section, so a check-then-act
//! race is not possible.

use std::ops::Deref;
use std::sync::{Mutex, MutexGuard, PoisonError};

use contracts::{MotionSample, PointSample};

/// Result of one batch append attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Whole batch inserted; carries the number of samples stored
    Appended(usize),
    /// Buffer at capacity; nothing inserted (and nothing ever will be)
    Full,
}

#[derive(Debug, Default)]
struct PointState {
    samples: Vec<PointSample>,
    full: bool,
}

/// Capacity-bounded, append-only point sample store.
#[derive(Debug)]
pub struct PointBuffer {
    state: Mutex<PointState>,
    capacity: usize,
}

impl PointBuffer {
    /// Create an empty buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(PointState::default()),
            capacity,
        }
    }

    /// Maximum number of samples the buffer will ever hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a whole frame set's batch, or nothing.
    ///
    /// `declared` is the frame set's raw vertex count (pre-filter); the
    /// capacity test uses it so that admission does not depend on how many
    /// vertices happened to be degenerate. Once an append is refused the
    /// buffer reports `Full` for every later frame set, regardless of size.
    pub fn try_append(&self, declared: usize, batch: Vec<PointSample>) -> AppendOutcome {
        let mut state = lock(&self.state);
        if state.full || state.samples.len() + declared > self.capacity {
            state.full = true;
            return AppendOutcome::Full;
        }
        let stored = batch.len();
        state.samples.extend(batch);
        AppendOutcome::Appended(stored)
    }

    /// Current number of stored samples.
    pub fn len(&self) -> usize {
        lock(&self.state).samples.len()
    }

    /// True when no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fraction of capacity in use, in [0,1].
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 1.0;
        }
        self.len() as f64 / self.capacity as f64
    }

    /// True once an append has been refused.
    pub fn is_full(&self) -> bool {
        lock(&self.state).full
    }

    /// Take the lock for the whole export pass.
    ///
    /// The guard keeps the mutex held for its lifetime; ingestion is already
    /// quiescent when export runs, but holding the lock documents and
    /// enforces the invariant.
    pub fn lock_for_export(&self) -> PointExportGuard<'_> {
        PointExportGuard(lock(&self.state))
    }
}

/// Export-time view over the point buffer contents.
pub struct PointExportGuard<'a>(MutexGuard<'a, PointState>);

impl Deref for PointExportGuard<'_> {
    type Target = [PointSample];

    fn deref(&self) -> &Self::Target {
        &self.0.samples
    }
}

/// Unbounded, append-only motion sample store.
#[derive(Debug, Default)]
pub struct MotionBuffer {
    state: Mutex<Vec<MotionSample>>,
}

impl MotionBuffer {
    /// Create an empty motion buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample.
    pub fn append(&self, sample: MotionSample) {
        lock(&self.state).push(sample);
    }

    /// Current number of stored samples.
    pub fn len(&self) -> usize {
        lock(&self.state).len()
    }

    /// True when no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the lock for the whole export pass.
    pub fn lock_for_export(&self) -> MotionExportGuard<'_> {
        MotionExportGuard(lock(&self.state))
    }
}

/// Export-time view over the motion buffer contents.
pub struct MotionExportGuard<'a>(MutexGuard<'a, Vec<MotionSample>>);

impl Deref for MotionExportGuard<'_> {
    type Target = [MotionSample];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// A poisoned mutex only means another callback panicked mid-append; the
// buffer contents are still well-formed samples, so keep going.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
