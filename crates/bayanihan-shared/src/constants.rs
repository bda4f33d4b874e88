use crate::types::Role;

/// Application name
pub const APP_NAME: &str = "Bayanihan";

/// File name of the SQLite database inside the platform data directory
pub const DB_FILE_NAME: &str = "bayanihan.db";

/// Collection keys. These are the exact key names the portal has always
/// persisted under; any rename breaks stored data.
pub const COLLECTION_ANNOUNCEMENTS: &str = "announcements";
pub const COLLECTION_USER_REPORTS: &str = "userReports";
pub const COLLECTION_CERT_REQUESTS: &str = "certificationRequests";
pub const COLLECTION_CALENDAR_EVENTS: &str = "calendarEvents";
pub const COLLECTION_RESIDENT_NOTIFICATIONS: &str = "notifications";
pub const COLLECTION_MODERATOR_NOTIFICATIONS: &str = "moderatorNotifications";
pub const COLLECTION_RESIDENT_INBOX: &str = "residentInbox";

/// Audit log collection for a role (`resident_auditLogs`,
/// `moderator_auditLogs`).
pub fn audit_log_key(role: Role) -> String {
    format!("{}_auditLogs", role.as_str())
}

/// Notification collection for a role.
pub fn notification_key(role: Role) -> &'static str {
    match role {
        Role::Resident => COLLECTION_RESIDENT_NOTIFICATIONS,
        Role::Moderator => COLLECTION_MODERATOR_NOTIFICATIONS,
    }
}

/// Maximum size of a single report/announcement attachment in bytes (10 MiB)
pub const MAX_ATTACHMENT_SIZE: usize = 10 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_keys_follow_role_prefix() {
        assert_eq!(audit_log_key(Role::Resident), "resident_auditLogs");
        assert_eq!(audit_log_key(Role::Moderator), "moderator_auditLogs");
    }

    #[test]
    fn notification_keys_match_portal_layout() {
        assert_eq!(notification_key(Role::Resident), "notifications");
        assert_eq!(notification_key(Role::Moderator), "moderatorNotifications");
    }
}
