//! Sign-in / sign-out commands.
//!
//! There is no credential verification (the portal has no auth server);
//! signing in picks the audience a window acts as, opens the database on
//! first use, and runs the startup sweep that drops past calendar
//! events.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tauri::State;
use tracing::info;

use bayanihan_shared::constants::COLLECTION_CALENDAR_EVENTS;
use bayanihan_shared::Role;
use bayanihan_store::Database;

use crate::events::emit_collection_changed;
use crate::state::{AppState, Session};

fn default_display_name(role: Role) -> &'static str {
    match role {
        Role::Resident => "Resident User",
        Role::Moderator => "Community Moderator",
    }
}

fn default_avatar(role: Role) -> &'static str {
    match role {
        Role::Resident => "https://via.placeholder.com/30/7c3aed/ffffff?text=R",
        Role::Moderator => "https://via.placeholder.com/48/2563eb/ffffff?text=M",
    }
}

#[tauri::command]
pub fn sign_in(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    role: Role,
    display_name: Option<String>,
    avatar: Option<String>,
) -> Result<Session, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;

    if guard.database.is_none() {
        let db = Database::new().map_err(|e| format!("Failed to open database: {e}"))?;
        guard.database = Some(db);
    }

    let session = Session {
        role,
        display_name: display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| default_display_name(role).to_string()),
        avatar: avatar.unwrap_or_else(|| default_avatar(role).to_string()),
    };
    guard.session = Some(session.clone());

    // Startup sweep: drop events whose date has passed.
    let swept = match guard.database.as_ref() {
        Some(db) => db
            .sweep_past_events(Utc::now().date_naive())
            .map_err(|e| format!("Failed to sweep past events: {e}"))?,
        None => 0,
    };
    drop(guard);

    if swept > 0 {
        emit_collection_changed(&app, COLLECTION_CALENDAR_EVENTS, window.label());
    }

    info!(role = %session.role, "signed in");
    Ok(session)
}

#[tauri::command]
pub fn sign_out(state: State<'_, Arc<Mutex<AppState>>>) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.session = None;
    info!("signed out");
    Ok(())
}

#[tauri::command]
pub fn current_session(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<Option<Session>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    Ok(guard.session.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_role() {
        assert_eq!(default_display_name(Role::Resident), "Resident User");
        assert_eq!(default_display_name(Role::Moderator), "Community Moderator");
        assert!(default_avatar(Role::Resident).contains("text=R"));
        assert!(default_avatar(Role::Moderator).contains("text=M"));
    }
}
