//! Per-role audit activity logs.
//!
//! Every user-visible mutation records what happened, who did it, and
//! free-form context. Each role owns its own collection
//! (`resident_auditLogs`, `moderator_auditLogs`), newest entry first.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use bayanihan_shared::constants::audit_log_key;
use bayanihan_shared::Role;

use crate::database::Database;
use crate::error::Result;
use crate::models::AuditLogEntry;

impl Database {
    /// Record an action in `role`'s audit log.
    pub fn record_audit_action(&self, role: Role, action: &str, details: Value) -> Result<AuditLogEntry> {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            action: action.to_string(),
            user: role.as_str().to_string(),
            details,
            timestamp: Utc::now().timestamp_millis(),
        };

        let key = audit_log_key(role);
        let mut all: Vec<AuditLogEntry> = self.read_collection(&key)?;
        all.insert(0, entry.clone());
        self.write_collection(&key, &all)?;

        tracing::debug!(role = %role, action, "audit action recorded");
        Ok(entry)
    }

    /// List `role`'s audit log, newest first.
    pub fn list_audit_log(&self, role: Role) -> Result<Vec<AuditLogEntry>> {
        self.read_collection(&audit_log_key(role))
    }
}
