//! Status enums and their transition rules.
//!
//! The portal's web build enforced transition legality only by disabling
//! buttons in the view layer; the underlying mutators accepted anything.
//! Here the graph is explicit and every mutator validates through
//! [`ReportStatus::transition`] / [`CertStatus::transition`], so an
//! illegal transition is a reported error rather than a silent write.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Progression of a resident report.
///
/// Serialized values are the persisted strings (`in-progress` included).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Submitted,
    Reviewed,
    Approved,
    InProgress,
    Done,
    Declined,
}

impl ReportStatus {
    /// Whether the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Done | ReportStatus::Declined)
    }

    /// Whether `self -> to` is a legal step of the moderation workflow.
    ///
    /// submitted -> reviewed | approved | declined
    /// reviewed  -> approved | declined
    /// approved  -> in-progress | done | declined
    /// in-progress -> done | declined
    pub fn can_transition(&self, to: ReportStatus) -> bool {
        use ReportStatus::*;
        match (self, to) {
            (Submitted, Reviewed | Approved | Declined) => true,
            (Reviewed, Approved | Declined) => true,
            (Approved, InProgress | Done | Declined) => true,
            (InProgress, Done | Declined) => true,
            _ => false,
        }
    }

    /// Validate a step, returning the new status or a domain error.
    pub fn transition(&self, to: ReportStatus) -> Result<ReportStatus, DomainError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(DomainError::InvalidReportTransition { from: *self, to })
        }
    }

    /// Human-readable label shown in notifications and tracking views.
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Submitted => "Pending Review",
            ReportStatus::Reviewed => "Under Review",
            ReportStatus::Approved => "Approved",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Done => "Resolved",
            ReportStatus::Declined => "Declined",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::Reviewed => "reviewed",
            ReportStatus::Approved => "approved",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Done => "done",
            ReportStatus::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// Progression of a certificate request. Both decisions are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CertStatus {
    Pending,
    Approved,
    Declined,
}

impl CertStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CertStatus::Approved | CertStatus::Declined)
    }

    pub fn can_transition(&self, to: CertStatus) -> bool {
        matches!(
            (self, to),
            (CertStatus::Pending, CertStatus::Approved | CertStatus::Declined)
        )
    }

    pub fn transition(&self, to: CertStatus) -> Result<CertStatus, DomainError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(DomainError::InvalidCertTransition { from: *self, to })
        }
    }
}

impl std::fmt::Display for CertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CertStatus::Pending => "Pending",
            CertStatus::Approved => "Approved",
            CertStatus::Declined => "Declined",
        };
        f.write_str(s)
    }
}
