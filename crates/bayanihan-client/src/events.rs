//! Change events pushed to the webview windows.
//!
//! Every successful mutation emits one [`EVENT_COLLECTION_CHANGED`] per
//! written collection. The payload names the collection and the window
//! that performed the write: the originating window already updated its
//! own in-memory state from the command result and ignores the event,
//! every other window reloads the collection. No debouncing.

use serde::Serialize;
use tauri::{AppHandle, Emitter};

/// A watched collection changed in the store.
pub const EVENT_COLLECTION_CHANGED: &str = "collection-changed";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionChangedPayload {
    /// Collection key, e.g. `userReports`.
    pub collection: String,
    /// Label of the window whose command performed the write.
    pub origin: String,
}

pub fn emit_collection_changed(app: &AppHandle, collection: &str, origin: &str) {
    let payload = CollectionChangedPayload {
        collection: collection.to_string(),
        origin: origin.to_string(),
    };
    if let Err(e) = app.emit(EVENT_COLLECTION_CHANGED, payload) {
        tracing::error!(collection, error = %e, "Failed to emit change event");
    }
}
