//! Mutators for the `userReports` collection.

use bayanihan_shared::constants::COLLECTION_USER_REPORTS;
use bayanihan_shared::{DomainError, EntityId, ReportStatus};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::fanout::FanOut;
use crate::models::{Report, ReportLocation};

/// Input of [`Database::submit_report`].
#[derive(Debug, Clone)]
pub struct NewReport {
    pub kind: String,
    pub description: String,
    /// Already-encoded data URIs, in attachment order.
    pub media: Vec<String>,
    pub location: Option<ReportLocation>,
}

impl Database {
    /// List all reports in submission order.
    pub fn list_reports(&self) -> Result<Vec<Report>> {
        self.read_collection(COLLECTION_USER_REPORTS)
    }

    /// File a new report.
    ///
    /// The report starts in `submitted` and one `new_report` notification
    /// is appended to the moderator collection.
    pub fn submit_report(&self, new: NewReport) -> Result<Report> {
        if new.kind.trim().is_empty() {
            return Err(DomainError::EmptyField("type").into());
        }
        if new.description.trim().is_empty() {
            return Err(DomainError::EmptyField("description").into());
        }

        let id = EntityId::now();
        let report = Report {
            id,
            date: id.0,
            status: ReportStatus::Submitted,
            kind: new.kind,
            description: new.description,
            media: new.media,
            location: new.location,
        };

        let mut all = self.list_reports()?;
        all.push(report.clone());
        self.write_collection(COLLECTION_USER_REPORTS, &all)?;

        // Second, independent write; a crash in between loses only the
        // notification (known weak consistency point).
        self.fan_out(FanOut::NewReport(&report))?;

        tracing::info!(id = %report.id, kind = %report.kind, "report submitted");
        Ok(report)
    }

    /// Move a report to `new_status`.
    ///
    /// The step is validated against the moderation workflow before
    /// anything is written; an unknown id is reported, leaving the
    /// collection unchanged and emitting no notification. Every
    /// successful change appends one `report_update` notification to the
    /// resident collection.
    pub fn update_report_status(
        &self,
        id: EntityId,
        new_status: ReportStatus,
    ) -> Result<Report> {
        let mut all = self.list_reports()?;
        let Some(report) = all.iter_mut().find(|r| r.id == id) else {
            return Err(StoreError::NotFound {
                collection: COLLECTION_USER_REPORTS,
                id,
            });
        };

        report.status = report.status.transition(new_status)?;
        let updated = report.clone();
        self.write_collection(COLLECTION_USER_REPORTS, &all)?;

        self.fan_out(FanOut::ReportUpdate(&updated))?;

        tracing::info!(id = %updated.id, status = %updated.status, "report status updated");
        Ok(updated)
    }

    /// Remove a report (resident cancellation or moderator deletion).
    pub fn delete_report(&self, id: EntityId) -> Result<()> {
        let mut all = self.list_reports()?;
        let before = all.len();
        all.retain(|r| r.id != id);
        if all.len() == before {
            return Err(StoreError::NotFound {
                collection: COLLECTION_USER_REPORTS,
                id,
            });
        }
        self.write_collection(COLLECTION_USER_REPORTS, &all)?;

        tracing::info!(%id, "report deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bayanihan_shared::{NotificationKind, Role};

    use super::*;

    fn open_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    fn noise_complaint() -> NewReport {
        NewReport {
            kind: "Noise Complaint".into(),
            description: "Karaoke at 2am".into(),
            media: vec![
                "data:image/png;base64,AAAA".into(),
                "data:image/jpeg;base64,BBBB".into(),
            ],
            location: None,
        }
    }

    #[test]
    fn submit_persists_report_and_notifies_moderators() {
        let (_dir, db) = open_db();
        let report = db.submit_report(noise_complaint()).unwrap();

        assert_eq!(report.status, ReportStatus::Submitted);
        assert_eq!(report.media.len(), 2);

        let stored = db.list_reports().unwrap();
        assert_eq!(stored, vec![report.clone()]);

        let mod_notifs = db.list_notifications(Role::Moderator).unwrap();
        assert_eq!(mod_notifs.len(), 1);
        assert_eq!(mod_notifs[0].kind, NotificationKind::NewReport);
        assert_eq!(mod_notifs[0].report_id, Some(report.id));
        assert!(db.list_notifications(Role::Resident).unwrap().is_empty());
    }

    #[test]
    fn submit_rejects_blank_description() {
        let (_dir, db) = open_db();
        let err = db
            .submit_report(NewReport {
                kind: "Noise Complaint".into(),
                description: "   ".into(),
                media: vec![],
                location: None,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Domain(DomainError::EmptyField("description"))
        ));
        assert!(db.list_reports().unwrap().is_empty());
        assert!(db.list_notifications(Role::Moderator).unwrap().is_empty());
    }

    #[test]
    fn approved_to_done_notifies_resident_once() {
        let (_dir, db) = open_db();
        let report = db.submit_report(noise_complaint()).unwrap();
        db.update_report_status(report.id, ReportStatus::Reviewed)
            .unwrap();
        db.update_report_status(report.id, ReportStatus::Approved)
            .unwrap();

        let before = db.list_notifications(Role::Resident).unwrap().len();
        let updated = db
            .update_report_status(report.id, ReportStatus::Done)
            .unwrap();
        assert_eq!(updated.status, ReportStatus::Done);

        let after = db.list_notifications(Role::Resident).unwrap();
        assert_eq!(after.len(), before + 1);
        assert_eq!(after[0].kind, NotificationKind::ReportUpdate);
        assert_eq!(after[0].report_id, Some(report.id));
        assert_eq!(
            after[0].message,
            "Your \"Noise Complaint\" report is now Resolved."
        );
    }

    #[test]
    fn unknown_id_changes_nothing_and_emits_nothing() {
        let (_dir, db) = open_db();
        let report = db.submit_report(noise_complaint()).unwrap();
        let before = db.list_reports().unwrap();

        let err = db
            .update_report_status(EntityId(404), ReportStatus::Reviewed)
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(db.list_reports().unwrap(), before);
        assert!(db.list_notifications(Role::Resident).unwrap().is_empty());
        drop(report);
    }

    #[test]
    fn illegal_transition_persists_nothing() {
        let (_dir, db) = open_db();
        let report = db.submit_report(noise_complaint()).unwrap();

        let err = db
            .update_report_status(report.id, ReportStatus::Done)
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Domain(DomainError::InvalidReportTransition { .. })
        ));
        assert_eq!(
            db.list_reports().unwrap()[0].status,
            ReportStatus::Submitted
        );
        assert!(db.list_notifications(Role::Resident).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_only_the_target() {
        let (_dir, db) = open_db();
        let first = db.submit_report(noise_complaint()).unwrap();
        let second = db
            .submit_report(NewReport {
                kind: "Stray Animals".into(),
                description: "Dogs near the plaza".into(),
                media: vec![],
                location: None,
            })
            .unwrap();

        db.delete_report(first.id).unwrap();

        let remaining = db.list_reports().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);

        assert!(matches!(
            db.delete_report(first.id).unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }
}
