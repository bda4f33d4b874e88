//! Derived statistics for the moderator dashboard.
//!
//! Pure aggregation over the report and certificate collections; nothing
//! here writes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bayanihan_shared::{CertStatus, ReportStatus};

use crate::database::Database;
use crate::error::Result;
use crate::models::{CertificateRequest, Report};

/// Trailing window a snapshot is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Daily,
    Weekly,
    Monthly,
    All,
}

impl TimeRange {
    /// Earliest timestamp (epoch ms) inside the window, if bounded.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<i64> {
        const DAY_MS: i64 = 24 * 60 * 60 * 1000;
        match self {
            TimeRange::Daily => {
                let start_of_day = now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();
                Some(start_of_day.timestamp_millis())
            }
            TimeRange::Weekly => Some(now.timestamp_millis() - 7 * DAY_MS),
            TimeRange::Monthly => Some(now.timestamp_millis() - 30 * DAY_MS),
            TimeRange::All => None,
        }
    }
}

/// Report counters by workflow stage.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total: usize,
    /// submitted or reviewed
    pub pending: usize,
    /// approved, in-progress or done
    pub approved: usize,
    pub declined: usize,
    /// done
    pub resolved: usize,
}

/// Certificate request counters by status.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub declined: usize,
}

/// Everything the dashboard renders for one time range.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub reports: ReportStats,
    pub certificates: CertStats,
    /// Five newest reports inside the window.
    pub recent_reports: Vec<Report>,
    /// Five newest requests inside the window.
    pub recent_requests: Vec<CertificateRequest>,
}

fn report_stats(reports: &[Report]) -> ReportStats {
    use ReportStatus::*;
    ReportStats {
        total: reports.len(),
        pending: reports
            .iter()
            .filter(|r| matches!(r.status, Submitted | Reviewed))
            .count(),
        approved: reports
            .iter()
            .filter(|r| matches!(r.status, Approved | InProgress | Done))
            .count(),
        declined: reports.iter().filter(|r| r.status == Declined).count(),
        resolved: reports.iter().filter(|r| r.status == Done).count(),
    }
}

fn cert_stats(requests: &[CertificateRequest]) -> CertStats {
    CertStats {
        total: requests.len(),
        pending: requests
            .iter()
            .filter(|r| r.status == CertStatus::Pending)
            .count(),
        approved: requests
            .iter()
            .filter(|r| r.status == CertStatus::Approved)
            .count(),
        declined: requests
            .iter()
            .filter(|r| r.status == CertStatus::Declined)
            .count(),
    }
}

fn recent<T: Clone>(items: &[T], date_of: impl Fn(&T) -> i64) -> Vec<T> {
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(date_of(item)));
    sorted.truncate(5);
    sorted
}

impl Database {
    /// Aggregate the dashboard numbers for `range`, evaluated at `now`.
    pub fn analytics_snapshot(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsSnapshot> {
        let cutoff = range.cutoff(now);
        let in_range = |date: i64| cutoff.map_or(true, |c| date >= c);

        let reports: Vec<Report> = self
            .list_reports()?
            .into_iter()
            .filter(|r| in_range(r.date))
            .collect();
        let requests: Vec<CertificateRequest> = self
            .list_certificate_requests()?
            .into_iter()
            .filter(|r| in_range(r.date))
            .collect();

        Ok(AnalyticsSnapshot {
            reports: report_stats(&reports),
            certificates: cert_stats(&requests),
            recent_reports: recent(&reports, |r| r.date),
            recent_requests: recent(&requests, |r| r.date),
        })
    }
}
