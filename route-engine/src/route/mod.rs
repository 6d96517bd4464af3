//! Editable multi-city route.
//!
//! [`RouteState`] is the aggregate; [`RouteEditor`] is the only thing that
//! mutates it. Stops are addressed by position and carry opaque ids, so a
//! city visited twice is two distinct entries.

mod editor;
mod inefficiency;
mod state;

pub use editor::RouteEditor;
pub use inefficiency::detour_positions;
pub use state::{EntryId, ParkedCity, RouteEntry, RouteState, RouteStatus};
