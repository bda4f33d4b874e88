//! Certificate request commands.

use std::sync::{Arc, Mutex};

use serde_json::json;
use tauri::State;
use tracing::info;

use bayanihan_shared::constants::{
    notification_key, COLLECTION_CERT_REQUESTS, COLLECTION_RESIDENT_INBOX,
};
use bayanihan_shared::{CertStatus, CertificateType, EntityId, Role};
use bayanihan_store::certificates::NewCertificateRequest;
use bayanihan_store::{CertificateRequest, ClearanceDetails, ResidencyDetails};

use crate::events::emit_collection_changed;
use crate::state::AppState;

#[tauri::command]
pub fn list_certificate_requests(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<Vec<CertificateRequest>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let db = guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())?;

    db.list_certificate_requests()
        .map_err(|e| format!("Failed to load certificate requests: {e}"))
}

/// Request a certificate. The requester name comes from the session; the
/// per-type detail record comes from the form.
#[tauri::command]
pub fn submit_certificate_request(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    certificate_type: CertificateType,
    purpose: String,
    clearance_details: Option<ClearanceDetails>,
    residency_details: Option<ResidencyDetails>,
) -> Result<CertificateRequest, String> {
    let request = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        let request = db
            .submit_certificate_request(NewCertificateRequest {
                kind: certificate_type,
                purpose,
                requester: session.display_name.clone(),
                clearance_details,
                residency_details,
            })
            .map_err(|e| format!("Failed to submit certificate request: {e}"))?;

        db.record_audit_action(
            session.role,
            "Requested Certificate",
            json!({ "requestId": request.id, "type": request.kind }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;

        request
    };

    emit_collection_changed(&app, COLLECTION_CERT_REQUESTS, window.label());
    emit_collection_changed(&app, notification_key(Role::Moderator), window.label());

    info!(id = %request.id, kind = %request.kind, "certificate requested");
    Ok(request)
}

/// Approve or decline a pending request (moderator action).
#[tauri::command]
pub fn decide_certificate_request(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    request_id: EntityId,
    decision: CertStatus,
) -> Result<CertificateRequest, String> {
    let request = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        if session.role != Role::Moderator {
            return Err("Only moderators can decide certificate requests".to_string());
        }
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        let request = db
            .decide_certificate_request(request_id, decision)
            .map_err(|e| format!("Failed to decide certificate request: {e}"))?;

        db.record_audit_action(
            session.role,
            "Decided Certificate Request",
            json!({ "requestId": request.id, "status": request.status }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;

        request
    };

    emit_collection_changed(&app, COLLECTION_CERT_REQUESTS, window.label());
    emit_collection_changed(&app, notification_key(Role::Resident), window.label());
    if request.status == CertStatus::Approved {
        emit_collection_changed(&app, COLLECTION_RESIDENT_INBOX, window.label());
    }

    Ok(request)
}

/// Remove a request from the system (moderator action).
#[tauri::command]
pub fn delete_certificate_request(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    request_id: EntityId,
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

        db.delete_certificate_request(request_id)
            .map_err(|e| format!("Failed to delete certificate request: {e}"))?;
        db.record_audit_action(
            session.role,
            "Deleted Certificate Request",
            json!({ "requestId": request_id }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;
    }

    emit_collection_changed(&app, COLLECTION_CERT_REQUESTS, window.label());
    Ok(())
}
