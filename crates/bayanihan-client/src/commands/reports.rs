//! Report commands: filing, tracking, moderation.

use std::sync::{Arc, Mutex};

use serde_json::json;
use tauri::State;
use tracing::info;

use bayanihan_shared::constants::{
    notification_key, COLLECTION_USER_REPORTS,
};
use bayanihan_shared::{EntityId, ReportStatus, Role};
use bayanihan_store::reports::NewReport;
use bayanihan_store::{Report, ReportLocation};

use crate::events::emit_collection_changed;
use crate::state::AppState;

use super::media;

#[tauri::command]
pub fn list_reports(state: State<'_, Arc<Mutex<AppState>>>) -> Result<Vec<Report>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let db = guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())?;

    db.list_reports()
        .map_err(|e| format!("Failed to load reports: {e}"))
}

/// File a new report.
///
/// Every attached file is read and encoded before the record is built;
/// one unreadable attachment rejects the whole submission.
#[tauri::command]
pub async fn submit_report(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    report_type: String,
    description: String,
    media_paths: Vec<String>,
    location: Option<ReportLocation>,
) -> Result<Report, String> {
    let media = media::encode_attachments(&media_paths).await?;

    let report = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        let report = db
            .submit_report(NewReport {
                kind: report_type,
                description,
                media,
                location,
            })
            .map_err(|e| format!("Failed to submit report: {e}"))?;

        db.record_audit_action(
            session.role,
            "Submitted Report",
            json!({ "reportId": report.id, "type": report.kind }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;

        report
    };

    emit_collection_changed(&app, COLLECTION_USER_REPORTS, window.label());
    emit_collection_changed(&app, notification_key(Role::Moderator), window.label());

    info!(id = %report.id, kind = %report.kind, "report submitted");
    Ok(report)
}

/// Move a report through the moderation workflow.
///
/// Illegal transitions and unknown ids are rejected by the store and
/// surface here as errors.
#[tauri::command]
pub fn update_report_status(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    report_id: EntityId,
    new_status: ReportStatus,
) -> Result<Report, String> {
    let report = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        let report = db
            .update_report_status(report_id, new_status)
            .map_err(|e| format!("Failed to update report status: {e}"))?;

        db.record_audit_action(
            session.role,
            "Updated Report Status",
            json!({ "reportId": report.id, "status": report.status }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;

        report
    };

    emit_collection_changed(&app, COLLECTION_USER_REPORTS, window.label());
    emit_collection_changed(&app, notification_key(Role::Resident), window.label());

    Ok(report)
}

/// Resident cancellation: removes the report from the system.
#[tauri::command]
pub fn cancel_report(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    report_id: EntityId,
) -> Result<(), String> {
    delete_with_audit(&app, &window, &state, report_id, "Cancelled Report")
}

/// Moderator deletion of a closed report.
#[tauri::command]
pub fn delete_report(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    report_id: EntityId,
) -> Result<(), String> {
    delete_with_audit(&app, &window, &state, report_id, "Deleted Report")
}

fn delete_with_audit(
    app: &tauri::AppHandle,
    window: &tauri::Window,
    state: &State<'_, Arc<Mutex<AppState>>>,
    report_id: EntityId,
    action: &str,
) -> Result<(), String> {
    {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        db.delete_report(report_id)
            .map_err(|e| format!("Failed to delete report: {e}"))?;
        db.record_audit_action(session.role, action, json!({ "reportId": report_id }))
            .map_err(|e| format!("Failed to record audit entry: {e}"))?;
    }

    emit_collection_changed(app, COLLECTION_USER_REPORTS, window.label());
    Ok(())
}
