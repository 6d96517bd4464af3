//! Trip profile persistence.
//!
//! Routes are saved per trip through the [`ProfileStore`] trait. The
//! [`DebouncedWriter`] sits in front of a store so rapid edits collapse into
//! a single write.

mod debounce;
mod error;
mod file;
mod memory;

pub use debounce::DebouncedWriter;
pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::domain::TripId;
use crate::route::RouteState;

/// Loads and saves routes by trip.
pub trait ProfileStore: Send + Sync {
    /// Load the saved route for a trip, or `None` if nothing was saved.
    fn load(&self, trip: &TripId) -> Result<Option<RouteState>, StoreError>;

    /// Save a route, replacing whatever was stored for the trip.
    fn save(&self, trip: &TripId, state: &RouteState) -> Result<(), StoreError>;
}
