//! Audit log commands.

use std::sync::{Arc, Mutex};

use tauri::State;

use bayanihan_store::AuditLogEntry;

use crate::state::AppState;

/// The session role's audit activity log, newest first.
#[tauri::command]
pub fn list_audit_log(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<Vec<AuditLogEntry>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard
        .session
        .as_ref()
        .ok_or_else(|| "Not signed in".to_string())?;
    let db = guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())?;

    db.list_audit_log(session.role)
        .map_err(|e| format!("Failed to load audit log: {e}"))
}
