//! JSON file profile store.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::TripId;
use crate::route::RouteState;

use super::{ProfileStore, StoreError};

/// Current document format version.
const DOCUMENT_VERSION: u32 = 1;

/// Saved route with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct RouteDocument {
    /// Format version.
    version: u32,
    /// Unix timestamp when the document was written.
    saved_at_secs: u64,
    /// The saved route.
    route: RouteState,
}

/// Just enough of a document to check its version before parsing the rest.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Stores each trip as `<dir>/<trip>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for a trip.
    pub fn path_for(&self, trip: &TripId) -> PathBuf {
        self.dir.join(format!("{}.json", trip.as_str()))
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self, trip: &TripId) -> Result<Option<RouteState>, StoreError> {
        let path = self.path_for(trip);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let probe: VersionProbe = serde_json::from_str(&contents)?;
        if probe.version != DOCUMENT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: probe.version,
                expected: DOCUMENT_VERSION,
            });
        }

        let document: RouteDocument = serde_json::from_str(&contents)?;
        debug!(%trip, saved_at = document.saved_at_secs, "Loaded route");
        Ok(Some(document.route))
    }

    fn save(&self, trip: &TripId, state: &RouteState) -> Result<(), StoreError> {
        let saved_at_secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let document = RouteDocument {
            version: DOCUMENT_VERSION,
            saved_at_secs,
            route: state.clone(),
        };

        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
        }

        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(self.path_for(trip), json)?;

        debug!(%trip, stops = state.len(), "Saved route");
        Ok(())
    }
}
