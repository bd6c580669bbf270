//! Per-article mutual exclusion for lifecycle tasks.
//!
//! At most one transcript or generation task runs per article. A second
//! request while the first is unresolved is rejected, not queued.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use vidscribe_core::types::DbId;

/// Set of article ids with a task in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    ids: Arc<Mutex<HashSet<DbId>>>,
}

/// Marks an article as busy until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    id: DbId,
    ids: Arc<Mutex<HashSet<DbId>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`. Returns `None` if another guard for it is alive.
    pub fn try_acquire(&self, id: DbId) -> Option<InFlightGuard> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        ids.insert(id).then(|| InFlightGuard {
            id,
            ids: Arc::clone(&self.ids),
        })
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }
}

impl InFlightGuard {
    pub fn id(&self) -> DbId {
        self.id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_rejected_until_release() {
        let in_flight = InFlight::new();
        let guard = in_flight.try_acquire(7).unwrap();
        assert_eq!(guard.id(), 7);
        assert!(in_flight.contains(7));
        assert!(in_flight.try_acquire(7).is_none());

        drop(guard);
        assert!(!in_flight.contains(7));
        assert!(in_flight.try_acquire(7).is_some());
    }

    #[test]
    fn ids_are_independent() {
        let in_flight = InFlight::new();
        let _a = in_flight.try_acquire(1).unwrap();
        assert!(in_flight.try_acquire(2).is_some());
    }

    #[test]
    fn clones_share_state() {
        let in_flight = InFlight::new();
        let other = in_flight.clone();
        let _guard = in_flight.try_acquire(3).unwrap();
        assert!(other.try_acquire(3).is_none());
    }
}
