use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Identifier for a domain record.
///
/// Ids are millisecond-epoch timestamps taken at creation, matching the
/// layout of the persisted collections. Within one process same-millisecond
/// creations are nudged forward so they stay distinct; nothing guards
/// against collisions across processes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub i64);

/// Highest id handed out by [`EntityId::now`] in this process.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

impl EntityId {
    /// Mint an id from the current wall clock.
    pub fn now() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut last = LAST_ID.load(Ordering::Relaxed);
        loop {
            let candidate = if now > last { now } else { last + 1 };
            match LAST_ID.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(candidate),
                Err(observed) => last = observed,
            }
        }
    }

    /// Derive a secondary id from this one.
    ///
    /// Records created as a side effect of the same mutation (fan-out
    /// notifications, inbox messages) take `primary.offset(1)`,
    /// `primary.offset(2)`, so they never collide with the primary record.
    pub fn offset(self, n: i64) -> Self {
        Self(self.0 + n)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two audiences of the portal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Resident,
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Resident => "resident",
            Role::Moderator => "moderator",
        }
    }

    /// The opposite audience, i.e. the fan-out target of a cross-audience
    /// action performed by this role.
    pub fn counterpart(&self) -> Role {
        match self {
            Role::Resident => Role::Moderator,
            Role::Moderator => Role::Resident,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Certificate kinds a resident can request.
///
/// The serialized strings are the exact values persisted by the portal;
/// renaming any of them breaks stored data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CertificateType {
    #[serde(rename = "Barangay Clearance")]
    BarangayClearance,
    #[serde(rename = "Certificate of Residency")]
    Residency,
    #[serde(rename = "Certificate of Indigency")]
    Indigency,
    #[serde(rename = "Certificate of Good Moral Character")]
    GoodMoralCharacter,
}

impl CertificateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateType::BarangayClearance => "Barangay Clearance",
            CertificateType::Residency => "Certificate of Residency",
            CertificateType::Indigency => "Certificate of Indigency",
            CertificateType::GoodMoralCharacter => "Certificate of Good Moral Character",
        }
    }
}

impl std::fmt::Display for CertificateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a notification record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewReport,
    ReportUpdate,
    NewAnnouncement,
    CertUpdate,
    NewCertRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_offsets_do_not_collide() {
        let id = EntityId::now();
        assert_ne!(id, id.offset(1));
        assert_eq!(id.offset(1).0, id.0 + 1);
    }

    #[test]
    fn same_millisecond_ids_stay_distinct() {
        let a = EntityId::now();
        let b = EntityId::now();
        let c = EntityId::now();
        assert!(a < b && b < c);
    }

    #[test]
    fn role_counterpart_is_involutive() {
        assert_eq!(Role::Resident.counterpart(), Role::Moderator);
        assert_eq!(Role::Moderator.counterpart().counterpart(), Role::Moderator);
    }

    #[test]
    fn certificate_type_serializes_to_portal_strings() {
        let json = serde_json::to_string(&CertificateType::GoodMoralCharacter).unwrap();
        assert_eq!(json, "\"Certificate of Good Moral Character\"");

        let back: CertificateType = serde_json::from_str("\"Barangay Clearance\"").unwrap();
        assert_eq!(back, CertificateType::BarangayClearance);
    }

    #[test]
    fn notification_kind_uses_snake_case() {
        let json = serde_json::to_string(&NotificationKind::NewCertRequest).unwrap();
        assert_eq!(json, "\"new_cert_request\"");
    }
}
