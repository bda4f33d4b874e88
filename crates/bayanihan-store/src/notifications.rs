//! Operations on the notification collections and the resident inbox.
//!
//! Each audience has its own collection (`notifications` for residents,
//! `moderatorNotifications` for moderators); records are kept newest
//! first. The resident inbox holds printable approved certificates.

use bayanihan_shared::constants::{notification_key, COLLECTION_RESIDENT_INBOX};
use bayanihan_shared::{EntityId, NotificationKind, Role};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{InboxMessage, Notification};

impl Database {
    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// List an audience's notifications, newest first.
    pub fn list_notifications(&self, role: Role) -> Result<Vec<Notification>> {
        self.read_collection(notification_key(role))
    }

    /// Number of unread notifications for the badge counter.
    pub fn unread_notification_count(&self, role: Role) -> Result<usize> {
        Ok(self
            .list_notifications(role)?
            .iter()
            .filter(|n| !n.is_read)
            .count())
    }

    /// Prepend one notification. Used by the fan-out path.
    pub(crate) fn push_notification(&self, role: Role, notification: Notification) -> Result<()> {
        let mut all = self.list_notifications(role)?;
        all.insert(0, notification);
        self.write_collection(notification_key(role), &all)
    }

    /// Mark a single notification read. Idempotent: marking a read
    /// notification again changes nothing.
    pub fn mark_notification_read(&self, role: Role, id: EntityId) -> Result<Notification> {
        let mut all = self.list_notifications(role)?;
        let Some(notification) = all.iter_mut().find(|n| n.id == id) else {
            return Err(StoreError::NotFound {
                collection: notification_key(role),
                id,
            });
        };
        notification.is_read = true;
        let updated = notification.clone();
        self.write_collection(notification_key(role), &all)?;
        Ok(updated)
    }

    /// Mark every notification read (opening the notification panel).
    pub fn mark_all_notifications_read(&self, role: Role) -> Result<()> {
        let mut all = self.list_notifications(role)?;
        for n in &mut all {
            n.is_read = true;
        }
        self.write_collection(notification_key(role), &all)
    }

    /// Mark every notification of one kind read (opening the report
    /// tracker marks `report_update` entries).
    pub fn mark_notifications_of_kind_read(
        &self,
        role: Role,
        kind: NotificationKind,
    ) -> Result<()> {
        let mut all = self.list_notifications(role)?;
        for n in all.iter_mut().filter(|n| n.kind == kind) {
            n.is_read = true;
        }
        self.write_collection(notification_key(role), &all)
    }

    /// Delete one notification.
    pub fn delete_notification(&self, role: Role, id: EntityId) -> Result<()> {
        let mut all = self.list_notifications(role)?;
        let before = all.len();
        all.retain(|n| n.id != id);
        if all.len() == before {
            return Err(StoreError::NotFound {
                collection: notification_key(role),
                id,
            });
        }
        self.write_collection(notification_key(role), &all)
    }

    /// Drop every notification, leaving an empty sequence.
    pub fn clear_notifications(&self, role: Role) -> Result<()> {
        self.write_collection::<Notification>(notification_key(role), &[])
    }

    // ------------------------------------------------------------------
    // Resident inbox
    // ------------------------------------------------------------------

    /// List the resident inbox, newest approval first.
    pub fn list_inbox(&self) -> Result<Vec<InboxMessage>> {
        self.read_collection(COLLECTION_RESIDENT_INBOX)
    }

    /// Prepend an approved certificate to the inbox.
    pub(crate) fn push_inbox_message(&self, message: InboxMessage) -> Result<()> {
        let mut all = self.list_inbox()?;
        all.insert(0, message);
        self.write_collection(COLLECTION_RESIDENT_INBOX, &all)
    }

    /// Mark an inbox message read. Idempotent.
    pub fn mark_inbox_message_read(&self, id: EntityId) -> Result<InboxMessage> {
        let mut all = self.list_inbox()?;
        let Some(message) = all.iter_mut().find(|m| m.id == id) else {
            return Err(StoreError::NotFound {
                collection: COLLECTION_RESIDENT_INBOX,
                id,
            });
        };
        message.is_read = true;
        let updated = message.clone();
        self.write_collection(COLLECTION_RESIDENT_INBOX, &all)?;
        Ok(updated)
    }

    /// Delete one inbox message.
    pub fn delete_inbox_message(&self, id: EntityId) -> Result<()> {
        let mut all = self.list_inbox()?;
        let before = all.len();
        all.retain(|m| m.id != id);
        if all.len() == before {
            return Err(StoreError::NotFound {
                collection: COLLECTION_RESIDENT_INBOX,
                id,
            });
        }
        self.write_collection(COLLECTION_RESIDENT_INBOX, &all)
    }
}

#[cfg(test)]
mod tests {
    use bayanihan_shared::CertificateType;

    use super::*;

    fn open_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    fn sample_notification(id: i64) -> Notification {
        Notification {
            id: EntityId(id),
            kind: NotificationKind::ReportUpdate,
            message: "update".into(),
            report_id: Some(EntityId(1)),
            request_id: None,
            post_id: None,
            is_read: false,
            date: id,
        }
    }

    #[test]
    fn push_prepends_newest_first() {
        let (_dir, db) = open_db();
        db.push_notification(Role::Resident, sample_notification(1))
            .unwrap();
        db.push_notification(Role::Resident, sample_notification(2))
            .unwrap();

        let all = db.list_notifications(Role::Resident).unwrap();
        assert_eq!(all[0].id, EntityId(2));
        assert_eq!(all[1].id, EntityId(1));
    }

    #[test]
    fn audiences_do_not_share_a_collection() {
        let (_dir, db) = open_db();
        db.push_notification(Role::Moderator, sample_notification(1))
            .unwrap();

        assert!(db.list_notifications(Role::Resident).unwrap().is_empty());
        assert_eq!(db.list_notifications(Role::Moderator).unwrap().len(), 1);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let (_dir, db) = open_db();
        db.push_notification(Role::Resident, sample_notification(1))
            .unwrap();

        db.mark_notification_read(Role::Resident, EntityId(1)).unwrap();
        let once = db.list_notifications(Role::Resident).unwrap();

        db.mark_notification_read(Role::Resident, EntityId(1)).unwrap();
        let twice = db.list_notifications(Role::Resident).unwrap();

        assert_eq!(once, twice);
        assert!(twice[0].is_read);
    }

    #[test]
    fn mark_read_unknown_id_is_reported() {
        let (_dir, db) = open_db();
        let err = db
            .mark_notification_read(Role::Resident, EntityId(404))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn mark_kind_read_leaves_other_kinds_unread() {
        let (_dir, db) = open_db();
        let mut other = sample_notification(2);
        other.kind = NotificationKind::NewAnnouncement;
        db.push_notification(Role::Resident, sample_notification(1))
            .unwrap();
        db.push_notification(Role::Resident, other).unwrap();

        db.mark_notifications_of_kind_read(Role::Resident, NotificationKind::ReportUpdate)
            .unwrap();

        let all = db.list_notifications(Role::Resident).unwrap();
        let update = all.iter().find(|n| n.id == EntityId(1)).unwrap();
        let announcement = all.iter().find(|n| n.id == EntityId(2)).unwrap();
        assert!(update.is_read);
        assert!(!announcement.is_read);
        assert_eq!(db.unread_notification_count(Role::Resident).unwrap(), 1);
    }

    #[test]
    fn clear_leaves_empty_sequence_not_missing() {
        let (_dir, db) = open_db();
        db.push_notification(Role::Resident, sample_notification(1))
            .unwrap();
        db.clear_notifications(Role::Resident).unwrap();

        assert_eq!(
            db.raw_collection("notifications").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn inbox_round_trip_and_delete() {
        let (_dir, db) = open_db();
        let message = InboxMessage {
            id: EntityId(10),
            certificate_type: CertificateType::Residency,
            requester: "Benjie Cabajar".into(),
            purpose: "For employment".into(),
            date_approved: 10,
            is_read: false,
        };
        db.push_inbox_message(message).unwrap();

        let read = db.mark_inbox_message_read(EntityId(10)).unwrap();
        assert!(read.is_read);

        db.delete_inbox_message(EntityId(10)).unwrap();
        assert!(db.list_inbox().unwrap().is_empty());
        assert!(matches!(
            db.delete_inbox_message(EntityId(10)).unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }
}
