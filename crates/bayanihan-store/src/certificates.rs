//! Mutators for the `certificationRequests` collection.
//!
//! Approval is the one mutator with two side effects: a `cert_update`
//! notification for the resident and a printable inbox message.

use chrono::Utc;

use bayanihan_shared::constants::COLLECTION_CERT_REQUESTS;
use bayanihan_shared::{CertStatus, CertificateType, DomainError, EntityId};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::fanout::FanOut;
use crate::models::{CertificateRequest, ClearanceDetails, InboxMessage, ResidencyDetails};

/// Input of [`Database::submit_certificate_request`].
#[derive(Debug, Clone)]
pub struct NewCertificateRequest {
    pub kind: CertificateType,
    pub purpose: String,
    pub requester: String,
    pub clearance_details: Option<ClearanceDetails>,
    pub residency_details: Option<ResidencyDetails>,
}

impl Database {
    /// List all certificate requests, newest first.
    pub fn list_certificate_requests(&self) -> Result<Vec<CertificateRequest>> {
        self.read_collection(COLLECTION_CERT_REQUESTS)
    }

    /// File a certificate request and notify moderators.
    pub fn submit_certificate_request(
        &self,
        new: NewCertificateRequest,
    ) -> Result<CertificateRequest> {
        if new.purpose.trim().is_empty() {
            return Err(DomainError::EmptyField("purpose").into());
        }
        if new.requester.trim().is_empty() {
            return Err(DomainError::EmptyField("requester").into());
        }

        let id = EntityId::now();
        let request = CertificateRequest {
            id,
            date: id.0,
            status: CertStatus::Pending,
            kind: new.kind,
            purpose: new.purpose,
            requester: new.requester,
            clearance_details: new.clearance_details,
            residency_details: new.residency_details,
        };

        let mut all = self.list_certificate_requests()?;
        all.insert(0, request.clone());
        self.write_collection(COLLECTION_CERT_REQUESTS, &all)?;

        self.fan_out(FanOut::NewCertRequest(&request))?;

        tracing::info!(id = %request.id, kind = %request.kind, "certificate requested");
        Ok(request)
    }

    /// Decide a pending request.
    ///
    /// The decision must be a legal step from `Pending`; an unknown id is
    /// reported and nothing is written. The resident always gets a
    /// `cert_update` notification; an approval additionally delivers a
    /// printable certificate to the inbox.
    pub fn decide_certificate_request(
        &self,
        id: EntityId,
        decision: CertStatus,
    ) -> Result<CertificateRequest> {
        let mut all = self.list_certificate_requests()?;
        let Some(request) = all.iter_mut().find(|r| r.id == id) else {
            return Err(StoreError::NotFound {
                collection: COLLECTION_CERT_REQUESTS,
                id,
            });
        };

        request.status = request.status.transition(decision)?;
        let decided = request.clone();
        self.write_collection(COLLECTION_CERT_REQUESTS, &all)?;

        self.fan_out(FanOut::CertUpdate(&decided))?;

        if decided.status == CertStatus::Approved {
            let approved_at = Utc::now().timestamp_millis();
            self.push_inbox_message(InboxMessage {
                id: EntityId::now().offset(2),
                certificate_type: decided.kind,
                requester: decided.requester.clone(),
                purpose: decided.purpose.clone(),
                date_approved: approved_at,
                is_read: false,
            })?;
        }

        tracing::info!(id = %decided.id, status = %decided.status, "certificate request decided");
        Ok(decided)
    }

    /// Remove a request.
    pub fn delete_certificate_request(&self, id: EntityId) -> Result<()> {
        let mut all = self.list_certificate_requests()?;
        let before = all.len();
        all.retain(|r| r.id != id);
        if all.len() == before {
            return Err(StoreError::NotFound {
                collection: COLLECTION_CERT_REQUESTS,
                id,
            });
        }
        self.write_collection(COLLECTION_CERT_REQUESTS, &all)?;

        tracing::info!(%id, "certificate request deleted");
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

    fn residency_request() -> NewCertificateRequest {
        NewCertificateRequest {
            kind: CertificateType::Residency,
            purpose: "For employment".into(),
            requester: "Benjie Cabajar".into(),
            clearance_details: None,
            residency_details: Some(ResidencyDetails {
                first_name: "Benjie".into(),
                middle_name: String::new(),
                last_name: "Cabajar".into(),
                address: "Purok 3, Poblacion".into(),
                length_of_residency: "5 years".into(),
            }),
        }
    }

    #[test]
    fn submit_persists_pending_and_notifies_moderators() {
        let (_dir, db) = open_db();
        let request = db
            .submit_certificate_request(residency_request())
            .unwrap();

        assert_eq!(request.status, CertStatus::Pending);

        let notifs = db.list_notifications(Role::Moderator).unwrap();
        assert_eq!(notifs.len(), 1);
        assert_eq!(notifs[0].kind, NotificationKind::NewCertRequest);
        assert_eq!(notifs[0].request_id, Some(request.id));
        assert_eq!(
            notifs[0].message,
            "A new \"Certificate of Residency\" has been requested."
        );
    }

    #[test]
    fn approval_delivers_inbox_message_and_notification() {
        let (_dir, db) = open_db();
        let request = db
            .submit_certificate_request(residency_request())
            .unwrap();

        let decided = db
            .decide_certificate_request(request.id, CertStatus::Approved)
            .unwrap();
        assert_eq!(decided.status, CertStatus::Approved);

        let notifs = db.list_notifications(Role::Resident).unwrap();
        assert_eq!(notifs.len(), 1);
        assert_eq!(notifs[0].kind, NotificationKind::CertUpdate);
        assert_eq!(
            notifs[0].message,
            "Your \"Certificate of Residency\" request has been approved."
        );

        let inbox = db.list_inbox().unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].certificate_type, CertificateType::Residency);
        assert_eq!(inbox[0].requester, "Benjie Cabajar");
        assert!(!inbox[0].is_read);
    }

    #[test]
    fn decline_notifies_without_inbox_delivery() {
        let (_dir, db) = open_db();
        let request = db
            .submit_certificate_request(residency_request())
            .unwrap();

        db.decide_certificate_request(request.id, CertStatus::Declined)
            .unwrap();

        assert_eq!(db.list_notifications(Role::Resident).unwrap().len(), 1);
        assert!(db.list_inbox().unwrap().is_empty());
    }

    #[test]
    fn deciding_twice_is_rejected() {
        let (_dir, db) = open_db();
        let request = db
            .submit_certificate_request(residency_request())
            .unwrap();
        db.decide_certificate_request(request.id, CertStatus::Approved)
            .unwrap();

        let err = db
            .decide_certificate_request(request.id, CertStatus::Declined)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::InvalidCertTransition { .. })
        ));

        // Only the first decision's side effects exist.
        assert_eq!(db.list_notifications(Role::Resident).unwrap().len(), 1);
        assert_eq!(db.list_inbox().unwrap().len(), 1);
    }

    #[test]
    fn deleting_last_request_leaves_empty_sequence() {
        let (_dir, db) = open_db();
        let request = db
            .submit_certificate_request(residency_request())
            .unwrap();

        db.delete_certificate_request(request.id).unwrap();

        assert!(db.list_certificate_requests().unwrap().is_empty());
        assert_eq!(
            db.raw_collection("certificationRequests").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn blank_purpose_is_rejected() {
        let (_dir, db) = open_db();
        let err = db
            .submit_certificate_request(NewCertificateRequest {
                purpose: " ".into(),
                ..residency_request()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::EmptyField("purpose"))
        ));
    }
}
