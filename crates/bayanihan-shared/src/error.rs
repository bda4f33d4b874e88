use thiserror::Error;

use crate::status::{CertStatus, ReportStatus};

/// Validation failures raised by the domain mutators before anything is
/// persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field was empty or blank.
    #[error("Required field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// An illegal step in the report moderation workflow.
    #[error("Illegal report transition: {from} -> {to}")]
    InvalidReportTransition { from: ReportStatus, to: ReportStatus },

    /// An illegal step in the certificate decision workflow.
    #[error("Illegal certificate transition: {from} -> {to}")]
    InvalidCertTransition { from: CertStatus, to: CertStatus },
}
