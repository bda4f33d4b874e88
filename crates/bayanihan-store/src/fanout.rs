//! Notification fan-out.
//!
//! Deterministic mapping from a cross-audience mutator action to the
//! counterpart audience's notification collection and a message template.
//! Each qualifying mutation appends exactly one record, unconditionally:
//! no batching, no deduplication.

use chrono::Utc;

use bayanihan_shared::{CertStatus, EntityId, NotificationKind, Role};

use crate::database::Database;
use crate::error::Result;
use crate::models::{Announcement, CertificateRequest, Notification, Report};

/// A mutator action that notifies the counterpart audience.
pub(crate) enum FanOut<'a> {
    /// Resident filed a report.
    NewReport(&'a Report),
    /// Moderator changed a report's status.
    ReportUpdate(&'a Report),
    /// Moderator posted an announcement.
    NewAnnouncement(&'a Announcement),
    /// Resident requested a certificate.
    NewCertRequest(&'a CertificateRequest),
    /// Moderator decided a certificate request.
    CertUpdate(&'a CertificateRequest),
}

impl FanOut<'_> {
    /// The audience whose collection receives the record.
    fn audience(&self) -> Role {
        match self {
            FanOut::NewReport(_) | FanOut::NewCertRequest(_) => Role::Moderator,
            FanOut::ReportUpdate(_) | FanOut::NewAnnouncement(_) | FanOut::CertUpdate(_) => {
                Role::Resident
            }
        }
    }

    fn build(&self) -> Notification {
        let date = Utc::now().timestamp_millis();
        match self {
            FanOut::NewReport(report) => Notification {
                // Side-effect records take the primary id plus an offset,
                // so they cannot collide with the primary record.
                id: report.id.offset(1),
                kind: NotificationKind::NewReport,
                message: format!("A new \"{}\" report has been submitted.", report.kind),
                report_id: Some(report.id),
                request_id: None,
                post_id: None,
                is_read: false,
                date,
            },
            FanOut::ReportUpdate(report) => Notification {
                id: EntityId::now(),
                kind: NotificationKind::ReportUpdate,
                message: format!(
                    "Your \"{}\" report is now {}.",
                    report.kind,
                    report.status.label()
                ),
                report_id: Some(report.id),
                request_id: None,
                post_id: None,
                is_read: false,
                date,
            },
            FanOut::NewAnnouncement(post) => Notification {
                id: post.id.offset(1),
                kind: NotificationKind::NewAnnouncement,
                message: format!("New announcement: \"{}\"", headline(post)),
                report_id: None,
                request_id: None,
                post_id: Some(post.id),
                is_read: false,
                date,
            },
            FanOut::NewCertRequest(request) => Notification {
                id: request.id.offset(1),
                kind: NotificationKind::NewCertRequest,
                message: format!("A new \"{}\" has been requested.", request.kind),
                report_id: None,
                request_id: Some(request.id),
                post_id: None,
                is_read: false,
                date,
            },
            FanOut::CertUpdate(request) => Notification {
                id: EntityId::now(),
                kind: NotificationKind::CertUpdate,
                message: format!(
                    "Your \"{}\" request has been {}.",
                    request.kind,
                    match request.status {
                        CertStatus::Approved => "approved",
                        CertStatus::Declined => "declined",
                        CertStatus::Pending => "updated",
                    }
                ),
                report_id: None,
                request_id: Some(request.id),
                post_id: None,
                is_read: false,
                date,
            },
        }
    }
}

/// What a feed notification quotes: the title when present, otherwise the
/// start of the description.
fn headline(post: &Announcement) -> String {
    if let Some(title) = post.title.as_deref() {
        if !title.trim().is_empty() {
            return title.trim().to_string();
        }
    }
    let trimmed = post.description.trim();
    if trimmed.chars().count() > 60 {
        let cut: String = trimmed.chars().take(60).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    }
}

impl Database {
    /// Append the notification for `event` to the counterpart audience's
    /// collection and return it.
    pub(crate) fn fan_out(&self, event: FanOut<'_>) -> Result<Notification> {
        let audience = event.audience();
        let notification = event.build();
        self.push_notification(audience, notification.clone())?;
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use bayanihan_shared::ReportStatus;

    use super::*;

    fn sample_report() -> Report {
        Report {
            id: EntityId(1000),
            date: 1000,
            status: ReportStatus::Submitted,
            kind: "Noise Complaint".into(),
            description: "Karaoke".into(),
            media: vec![],
            location: None,
        }
    }

    #[test]
    fn new_report_targets_moderators() {
        let report = sample_report();
        let event = FanOut::NewReport(&report);
        assert_eq!(event.audience(), Role::Moderator);

        let notif = event.build();
        assert_eq!(notif.kind, NotificationKind::NewReport);
        assert_eq!(notif.id, EntityId(1001));
        assert_eq!(notif.report_id, Some(EntityId(1000)));
        assert_eq!(
            notif.message,
            "A new \"Noise Complaint\" report has been submitted."
        );
        assert!(!notif.is_read);
    }

    #[test]
    fn report_update_targets_residents_with_status_label() {
        let mut report = sample_report();
        report.status = ReportStatus::Done;

        let event = FanOut::ReportUpdate(&report);
        assert_eq!(event.audience(), Role::Resident);
        assert_eq!(
            event.build().message,
            "Your \"Noise Complaint\" report is now Resolved."
        );
    }

    #[test]
    fn announcement_headline_prefers_title() {
        let post = Announcement {
            id: EntityId(5),
            title: Some("Water interruption".into()),
            description: "Long text that would otherwise be quoted".into(),
            images: vec![],
            author: "Community Moderator".into(),
            author_avatar: String::new(),
            date: 5,
            comments: vec![],
        };
        assert_eq!(headline(&post), "Water interruption");
    }

    #[test]
    fn announcement_headline_truncates_long_description() {
        let post = Announcement {
            id: EntityId(5),
            title: None,
            description: "x".repeat(100),
            images: vec![],
            author: "Community Moderator".into(),
            author_avatar: String::new(),
            date: 5,
            comments: vec![],
        };
        let headline = headline(&post);
        assert!(headline.ends_with("..."));
        assert_eq!(headline.chars().count(), 63);
    }
}
