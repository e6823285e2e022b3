//! Admin dashboard statistics.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::types::{Inquiry, InquiryStatus, Notice};

/// Notices created within this many days count as recent.
pub const RECENT_NOTICE_WINDOW_DAYS: i64 = 7;

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// All inquiries.
    pub total_inquiries: usize,
    /// Inquiries still in the pending state.
    pub pending_inquiries: usize,
    /// All notices.
    pub total_notices: usize,
    /// Notices created in the last [`RECENT_NOTICE_WINDOW_DAYS`] days.
    pub recent_notices: usize,
}

impl DashboardStats {
    /// Compute stats from freshly listed records.
    pub fn compute(notices: &[Notice], inquiries: &[Inquiry], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(RECENT_NOTICE_WINDOW_DAYS);
        Self {
            total_inquiries: inquiries.len(),
            pending_inquiries: inquiries
                .iter()
                .filter(|i| i.status == InquiryStatus::Pending)
                .count(),
            total_notices: notices.len(),
            recent_notices: notices.iter().filter(|n| n.created_at >= cutoff).count(),
        }
    }
}
