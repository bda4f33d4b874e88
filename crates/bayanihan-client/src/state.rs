//! Application state shared across all Tauri commands.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` and registered
//! with Tauri's managed state system so that every invoke handler can
//! access it.

use serde::Serialize;

use bayanihan_shared::Role;
use bayanihan_store::Database;

/// The signed-in user. Sign-in performs no credential verification; this
/// only records which audience the window acts as and the display values
/// stamped onto authored records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    pub display_name: String,
    pub avatar: String,
}

/// Central application state.
pub struct AppState {
    /// Handle to the local database.
    /// `None` until the first sign-in opens it.
    pub database: Option<Database>,

    /// Current session, `None` before sign-in and after sign-out.
    pub session: Option<Session>,
}

impl AppState {
    /// Create a new, uninitialised application state.
    pub fn new() -> Self {
        Self {
            database: None,
            session: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
