//! Notification and inbox commands.
//!
//! The audience is taken from the session, so a window only ever touches
//! its own notification collection.

use std::sync::{Arc, Mutex, MutexGuard};

use tauri::State;

use bayanihan_shared::constants::{notification_key, COLLECTION_RESIDENT_INBOX};
use bayanihan_shared::{EntityId, NotificationKind, Role};
use bayanihan_store::{Database, InboxMessage, Notification};

use crate::events::emit_collection_changed;
use crate::state::AppState;

fn session_role(guard: &MutexGuard<'_, AppState>) -> Result<Role, String> {
    guard
        .session
        .as_ref()
        .map(|s| s.role)
        .ok_or_else(|| "Not signed in".to_string())
}

fn database<'a>(guard: &'a MutexGuard<'_, AppState>) -> Result<&'a Database, String> {
    guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())
}

#[tauri::command]
pub fn list_notifications(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<Vec<Notification>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let role = session_role(&guard)?;
    database(&guard)?
        .list_notifications(role)
        .map_err(|e| format!("Failed to load notifications: {e}"))
}

#[tauri::command]
pub fn unread_notification_count(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<usize, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let role = session_role(&guard)?;
    database(&guard)?
        .unread_notification_count(role)
        .map_err(|e| format!("Failed to count notifications: {e}"))
}

#[tauri::command]
pub fn mark_notification_read(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    notification_id: EntityId,
) -> Result<Notification, String> {
    let (role, notification) = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let role = session_role(&guard)?;
        let notification = database(&guard)?
            .mark_notification_read(role, notification_id)
            .map_err(|e| format!("Failed to mark notification read: {e}"))?;
        (role, notification)
    };

    emit_collection_changed(&app, notification_key(role), window.label());
    Ok(notification)
}

/// Opening the notification panel marks everything read.
#[tauri::command]
pub fn mark_all_notifications_read(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<(), String> {
    let role = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let role = session_role(&guard)?;
        database(&guard)?
            .mark_all_notifications_read(role)
            .map_err(|e| format!("Failed to mark notifications read: {e}"))?;
        role
    };

    emit_collection_changed(&app, notification_key(role), window.label());
    Ok(())
}

/// Opening the report tracker marks the `report_update` entries read.
#[tauri::command]
pub fn mark_notifications_of_kind_read(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    kind: NotificationKind,
) -> Result<(), String> {
    let role = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let role = session_role(&guard)?;
        database(&guard)?
            .mark_notifications_of_kind_read(role, kind)
            .map_err(|e| format!("Failed to mark notifications read: {e}"))?;
        role
    };

    emit_collection_changed(&app, notification_key(role), window.label());
    Ok(())
}

#[tauri::command]
pub fn delete_notification(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    notification_id: EntityId,
) -> Result<(), String> {
    let role = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let role = session_role(&guard)?;
        database(&guard)?
            .delete_notification(role, notification_id)
            .map_err(|e| format!("Failed to delete notification: {e}"))?;
        role
    };

    emit_collection_changed(&app, notification_key(role), window.label());
    Ok(())
}

#[tauri::command]
pub fn clear_notifications(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<(), String> {
    let role = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let role = session_role(&guard)?;
        database(&guard)?
            .clear_notifications(role)
            .map_err(|e| format!("Failed to clear notifications: {e}"))?;
        role
    };

    emit_collection_changed(&app, notification_key(role), window.label());
    Ok(())
}

// ---------------------------------------------------------------------------
// Resident inbox
// ---------------------------------------------------------------------------

#[tauri::command]
pub fn list_inbox(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<Vec<InboxMessage>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    database(&guard)?
        .list_inbox()
        .map_err(|e| format!("Failed to load inbox: {e}"))
}

#[tauri::command]
pub fn mark_inbox_message_read(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    message_id: EntityId,
) -> Result<InboxMessage, String> {
    let message = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        database(&guard)?
            .mark_inbox_message_read(message_id)
            .map_err(|e| format!("Failed to mark inbox message read: {e}"))?
    };

    emit_collection_changed(&app, COLLECTION_RESIDENT_INBOX, window.label());
    Ok(message)
}

#[tauri::command]
pub fn delete_inbox_message(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    message_id: EntityId,
) -> Result<(), String> {
    {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        database(&guard)?
            .delete_inbox_message(message_id)
            .map_err(|e| format!("Failed to delete inbox message: {e}"))?;
    }

    emit_collection_changed(&app, COLLECTION_RESIDENT_INBOX, window.label());
    Ok(())
}
