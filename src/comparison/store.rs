/*!
 * Holder of the current comparison snapshot.
 */

use std::sync::Arc;

use parking_lot::RwLock;

use super::candidate::ComparisonState;

/// Shared owner of the single current `ComparisonState`.
///
/// Readers get cloned snapshots. Writers replace the snapshot as a whole, so a
/// reader never observes a half-applied transition. The lock is only held for
/// the duration of a clone or a swap, never across an await point.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    current: Arc<RwLock<ComparisonState>>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current snapshot
    pub fn snapshot(&self) -> ComparisonState {
        self.current.read().clone()
    }

    /// Replace the current snapshot, returning the previous one
    pub fn replace(&self, state: ComparisonState) -> ComparisonState {
        std::mem::replace(&mut *self.current.write(), state)
    }

    /// Apply a transition to the current snapshot and store its result.
    ///
    /// The transition receives the current snapshot and returns the next one
    /// plus a value handed back to the caller.
    pub fn update<R>(&self, transition: impl FnOnce(&ComparisonState) -> (ComparisonState, R)) -> R {
        let mut guard = self.current.write();
        let (next, result) = transition(&*guard);
        *guard = next;
        result
    }

    /// Drop every candidate
    pub fn clear(&self) {
        self.replace(ComparisonState::empty());
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}
