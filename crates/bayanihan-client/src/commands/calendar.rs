//! Calendar event commands.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::json;
use tauri::State;

use bayanihan_shared::constants::COLLECTION_CALENDAR_EVENTS;
use bayanihan_shared::{EntityId, Role};
use bayanihan_store::calendar::SaveEvent;
use bayanihan_store::CalendarEvent;

use crate::events::emit_collection_changed;
use crate::state::AppState;

#[tauri::command]
pub fn list_events(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<Vec<CalendarEvent>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let db = guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())?;

    db.list_events()
        .map_err(|e| format!("Failed to load events: {e}"))
}

#[tauri::command]
pub fn events_on(
    state: State<'_, Arc<Mutex<AppState>>>,
    date: NaiveDate,
) -> Result<Vec<CalendarEvent>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let db = guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())?;

    db.events_on(date)
        .map_err(|e| format!("Failed to load events: {e}"))
}

/// Add a new event or edit an existing one (moderator action).
#[tauri::command]
pub fn save_event(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    event_id: Option<EntityId>,
    title: String,
    description: Option<String>,
    date: NaiveDate,
) -> Result<CalendarEvent, String> {
    let event = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        if session.role != Role::Moderator {
            return Err("Only moderators can schedule events".to_string());
        }
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        let event = db
            .save_event(SaveEvent {
                id: event_id,
                title,
                description,
                date,
            })
            .map_err(|e| format!("Failed to save event: {e}"))?;

        db.record_audit_action(
            session.role,
            "Saved Event",
            json!({ "eventId": event.id, "date": event.date }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;

        event
    };

    emit_collection_changed(&app, COLLECTION_CALENDAR_EVENTS, window.label());
    Ok(event)
}

/// Remove an event (moderator action).
#[tauri::command]
pub fn delete_event(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    event_id: EntityId,
) -> Result<(), String> {
    {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        if session.role != Role::Moderator {
            return Err("Only moderators can delete events".to_string());
        }
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        db.delete_event(event_id)
            .map_err(|e| format!("Failed to delete event: {e}"))?;
        db.record_audit_action(session.role, "Deleted Event", json!({ "eventId": event_id }))
            .map_err(|e| format!("Failed to record audit entry: {e}"))?;
    }

    emit_collection_changed(&app, COLLECTION_CALENDAR_EVENTS, window.label());
    Ok(())
}
