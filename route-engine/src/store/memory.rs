//! In-memory profile store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::TripId;
use crate::route::RouteState;

use super::{ProfileStore, StoreError};

/// Keeps routes in a map. Useful for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    routes: Mutex<HashMap<TripId, RouteState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trips stored.
    pub fn len(&self) -> usize {
        self.routes().len()
    }

    /// Returns true if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.routes().is_empty()
    }

    fn routes(&self) -> MutexGuard<'_, HashMap<TripId, RouteState>> {
        self.routes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self, trip: &TripId) -> Result<Option<RouteState>, StoreError> {
        Ok(self.routes().get(trip).cloned())
    }

    fn save(&self, trip: &TripId, state: &RouteState) -> Result<(), StoreError> {
        self.routes().insert(trip.clone(), state.clone());
        Ok(())
    }
}
