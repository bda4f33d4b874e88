//! Domain model structs persisted in the local database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer over IPC. Field names serialize in camelCase
//! to stay byte-compatible with the collections the portal's web build
//! persisted; renaming a field here breaks existing stored data.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use bayanihan_shared::{CertStatus, CertificateType, EntityId, NotificationKind, ReportStatus};

// ---------------------------------------------------------------------------
// Announcement
// ---------------------------------------------------------------------------

/// A moderator announcement shown on every home feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    /// Attached images as data URIs, in attachment order.
    #[serde(default)]
    pub images: Vec<String>,
    pub author: String,
    pub author_avatar: String,
    /// Creation time, epoch milliseconds.
    pub date: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// One comment under an announcement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub author_avatar: String,
    /// Posting time, epoch milliseconds.
    pub date: i64,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A resident report (complaint / incident).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: EntityId,
    /// Submission time, epoch milliseconds.
    pub date: i64,
    pub status: ReportStatus,
    /// Free-text report category, e.g. "Noise Complaint".
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    /// Attached evidence as data URIs, in attachment order.
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ReportLocation>,
}

/// Where the reported incident happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

// ---------------------------------------------------------------------------
// Certificate request
// ---------------------------------------------------------------------------

/// A resident's request for a barangay certificate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub id: EntityId,
    /// Submission time, epoch milliseconds.
    pub date: i64,
    pub status: CertStatus,
    #[serde(rename = "type")]
    pub kind: CertificateType,
    pub purpose: String,
    pub requester: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance_details: Option<ClearanceDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residency_details: Option<ResidencyDetails>,
}

/// Extra fields required for a Barangay Clearance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceDetails {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub address: String,
    pub dob: String,
    pub civil_status: String,
}

/// Extra fields required for a Certificate of Residency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResidencyDetails {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub address: String,
    pub length_of_residency: String,
}

// ---------------------------------------------------------------------------
// Calendar event
// ---------------------------------------------------------------------------

/// A calendar event (no time component).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: chrono::NaiveDate,
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// An in-app notification delivered to one audience's collection.
///
/// The foreign reference field depends on the kind: reports carry
/// `reportId`, certificate requests `requestId`, announcements `postId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<EntityId>,
    pub is_read: bool,
    /// Creation time, epoch milliseconds.
    pub date: i64,
}

// ---------------------------------------------------------------------------
// Inbox message
// ---------------------------------------------------------------------------

/// A printable approved certificate delivered to the resident inbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessage {
    pub id: EntityId,
    pub certificate_type: CertificateType,
    pub requester: String,
    pub purpose: String,
    /// Approval time, epoch milliseconds.
    pub date_approved: i64,
    pub is_read: bool,
}

// ---------------------------------------------------------------------------
// Audit log entry
// ---------------------------------------------------------------------------

/// One entry of a role's audit activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: Uuid,
    /// Action name, e.g. "Submitted Report".
    pub action: String,
    /// The role that performed the action.
    pub user: String,
    /// Free-form context, e.g. `{"reportId": 1712000000000}`.
    pub details: Value,
    /// Epoch milliseconds.
    pub timestamp: i64,
}
