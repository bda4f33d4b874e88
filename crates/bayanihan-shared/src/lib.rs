//! Shared domain vocabulary for the Bayanihan portal.
//!
//! Everything here is used by both the store and the client: roles,
//! entity ids, status enums with their transition rules, collection key
//! names, and the domain error type.

pub mod constants;
pub mod status;
pub mod types;

mod error;

pub use error::DomainError;
pub use status::{CertStatus, ReportStatus};
pub use types::{CertificateType, EntityId, NotificationKind, Role};
