//! Moderator dashboard commands.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tauri::State;

use bayanihan_shared::Role;
use bayanihan_store::analytics::{AnalyticsSnapshot, TimeRange};

use crate::state::AppState;

/// Aggregate the dashboard numbers for the requested time range.
#[tauri::command]
pub fn analytics_snapshot(
    state: State<'_, Arc<Mutex<AppState>>>,
    range: TimeRange,
) -> Result<AnalyticsSnapshot, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard
        .session
        .as_ref()
        .ok_or_else(|| "Not signed in".to_string())?;
    if session.role != Role::Moderator {
        return Err("Only moderators can view analytics".to_string());
    }
    let db = guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())?;

    db.analytics_snapshot(range, Utc::now())
        .map_err(|e| format!("Failed to aggregate analytics: {e}"))
}
