//! Announcement feed commands.

use std::sync::{Arc, Mutex};

use serde_json::json;
use tauri::State;
use tracing::info;

use bayanihan_shared::constants::{notification_key, COLLECTION_ANNOUNCEMENTS};
use bayanihan_shared::{EntityId, Role};
use bayanihan_store::announcements::{NewAnnouncement, NewComment};
use bayanihan_store::Announcement;

use crate::events::emit_collection_changed;
use crate::state::AppState;

use super::media;

#[tauri::command]
pub fn list_announcements(
    state: State<'_, Arc<Mutex<AppState>>>,
) -> Result<Vec<Announcement>, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let db = guard
        .database
        .as_ref()
        .ok_or_else(|| "Database not opened".to_string())?;

    db.list_announcements()
        .map_err(|e| format!("Failed to load announcements: {e}"))
}

/// Post an announcement (moderator action). Attached images are encoded
/// as data URIs before the post is built.
#[tauri::command]
pub async fn create_announcement(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    title: Option<String>,
    description: String,
    image_paths: Vec<String>,
) -> Result<Announcement, String> {
    let images = media::encode_attachments(&image_paths).await?;

    let post = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        if session.role != Role::Moderator {
            return Err("Only moderators can post announcements".to_string());
        }
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        let post = db
            .create_announcement(NewAnnouncement {
                title,
                description,
                images,
                author: session.display_name.clone(),
                author_avatar: session.avatar.clone(),
            })
            .map_err(|e| format!("Failed to post announcement: {e}"))?;

        db.record_audit_action(
            session.role,
            "Posted Announcement",
            json!({ "postId": post.id }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;

        post
    };

    emit_collection_changed(&app, COLLECTION_ANNOUNCEMENTS, window.label());
    emit_collection_changed(&app, notification_key(Role::Resident), window.label());

    info!(id = %post.id, "announcement posted");
    Ok(post)
}

/// Comment on a post. Both audiences may comment; the author fields come
/// from the session.
#[tauri::command]
pub fn add_comment(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    post_id: EntityId,
    text: String,
) -> Result<Announcement, String> {
    let post = {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        db.add_comment(
            post_id,
            NewComment {
                author: session.display_name.clone(),
                author_avatar: session.avatar.clone(),
                text,
            },
        )
        .map_err(|e| format!("Failed to add comment: {e}"))?
    };

    emit_collection_changed(&app, COLLECTION_ANNOUNCEMENTS, window.label());
    Ok(post)
}

/// Take a post down (moderator action).
#[tauri::command]
pub fn delete_announcement(
    app: tauri::AppHandle,
    window: tauri::Window,
    state: State<'_, Arc<Mutex<AppState>>>,
    post_id: EntityId,
) -> Result<(), String> {
    {
        let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        let session = guard
            .session
            .clone()
            .ok_or_else(|| "Not signed in".to_string())?;
        if session.role != Role::Moderator {
            return Err("Only moderators can delete announcements".to_string());
        }
        let db = guard
            .database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())?;

        db.delete_announcement(post_id)
            .map_err(|e| format!("Failed to delete announcement: {e}"))?;
        db.record_audit_action(
            session.role,
            "Deleted Announcement",
            json!({ "postId": post_id }),
        )
        .map_err(|e| format!("Failed to record audit entry: {e}"))?;
    }

    emit_collection_changed(&app, COLLECTION_ANNOUNCEMENTS, window.label());
    Ok(())
}
