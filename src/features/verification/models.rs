use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::checkouts::models::{Checkout, Item, ReviewDecision, VerificationStatus};
use crate::features::verification::aggregator::session_status_of;
use crate::shared::types::PaginationQuery;

/// How far back an approval may date and still show in the approved queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovedWindow {
    /// Configured default (30 days unless overridden)
    #[default]
    Default,
    Days(i64),
    Unbounded,
}

/// A reviewer-queue listing request. Only constructed from validated input.
#[derive(Debug, Clone)]
pub struct QueueQuery {
    pub status: VerificationStatus,
    pub year_range: Option<String>,
    /// Ignored unless `status` is `approved`
    pub approved_window: ApprovedWindow,
    pub pagination: PaginationQuery,
}

impl QueueQuery {
    pub fn new(status: VerificationStatus) -> Self {
        Self {
            status,
            year_range: None,
            approved_window: ApprovedWindow::Default,
            pagination: PaginationQuery::default(),
        }
    }
}

/// Session counts per derived status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueueStats {
    pub pending: i64,
    pub approved: i64,
    pub flagged: i64,
}

impl QueueStats {
    fn bump(&mut self, status: VerificationStatus) {
        match status {
            VerificationStatus::Pending => self.pending += 1,
            VerificationStatus::Approved => self.approved += 1,
            VerificationStatus::Flagged => self.flagged += 1,
        }
    }
}

/// A session under review, read together with its items
#[derive(Debug, Clone)]
pub struct ReviewSession {
    pub checkout: Checkout,
    pub items: Vec<Item>,
    pub status: VerificationStatus,
}

impl ReviewSession {
    pub fn new(checkout: Checkout, mut items: Vec<Item>) -> Self {
        items.sort_by_key(|i| i.id);
        let status = session_status_of(&items);
        Self {
            checkout,
            items,
            status,
        }
    }

    /// Whether the session belongs under the `status` tab.
    ///
    /// A session shows under exactly one tab, its derived status. Approved
    /// sessions additionally need an approval at or after `cutoff`.
    pub fn visible_under(&self, status: VerificationStatus, cutoff: Option<DateTime<Utc>>) -> bool {
        if self.status != status {
            return false;
        }
        match (status, cutoff) {
            (VerificationStatus::Approved, Some(cutoff)) => self
                .items
                .iter()
                .any(|item| approved_since(item, cutoff)),
            _ => true,
        }
    }
}

pub(crate) fn approved_since(item: &Item, cutoff: DateTime<Utc>) -> bool {
    item.verification_status == VerificationStatus::Approved
        && item.verified_at.is_some_and(|at| at >= cutoff)
}

/// Counts every session under the tab it is visible in
pub fn queue_stats(sessions: &[ReviewSession], cutoff: Option<DateTime<Utc>>) -> QueueStats {
    let mut stats = QueueStats::default();
    for session in sessions {
        if session.visible_under(session.status, cutoff) {
            stats.bump(session.status);
        }
    }
    stats
}

/// Resolves the approved window to a cutoff instant.
///
/// A window reaching back past the earliest representable time covers every
/// approval, so it resolves to no cutoff at all.
pub fn approved_cutoff(
    window: ApprovedWindow,
    default_days: i64,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let days = match window {
        ApprovedWindow::Default => default_days,
        ApprovedWindow::Days(days) => days,
        ApprovedWindow::Unbounded => return None,
    };
    Duration::try_days(days).and_then(|width| now.checked_sub_signed(width))
}

/// One page of the session queue
#[derive(Debug, Clone)]
pub struct SessionPage {
    pub sessions: Vec<ReviewSession>,
    pub total: i64,
    pub stats: QueueStats,
}

/// An item in the item-granularity queue, with its session context
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub item: Item,
    pub checkout: Checkout,
    pub checkout_status: VerificationStatus,
}

/// One page of the item queue
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub items: Vec<QueueItem>,
    pub total: i64,
    pub stats: QueueStats,
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Reviewer decision applied to every item of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatusUpdate {
    pub decision: ReviewDecision,
    /// Stamped into `verified_by` when present
    pub actor: Option<String>,
}

/// What a session-level update did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionUpdateOutcome {
    Updated,
    /// The session exists but has no items
    NoItems,
}

/// Single-item verification change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStatusUpdate {
    pub status: Option<ReviewDecision>,
    /// Explicit override of the derived `flagged` mirror
    pub flagged: Option<bool>,
    pub verified_by: Option<String>,
    pub image_url: Option<String>,
    /// Refresh `verified_at` even without a status change
    pub stamp_verified_at: bool,
}

impl ItemStatusUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.flagged.is_none()
            && self.verified_by.is_none()
            && self.image_url.is_none()
            && !self.stamp_verified_at
    }

    /// Value to write to `flagged`: the override, else the mirror of the new status
    pub fn flagged_value(&self) -> Option<bool> {
        self.flagged.or_else(|| {
            self.status
                .map(|decision| VerificationStatus::from(decision).flagged())
        })
    }

    pub fn stamps_verified_at(&self) -> bool {
        self.status.is_some() || self.stamp_verified_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
    }

    fn item(id: i64, status: VerificationStatus, verified_at: Option<DateTime<Utc>>) -> Item {
        Item {
            id,
            checkout_id: 1,
            year_range: None,
            item_name: "Kettle".to_string(),
            item_quantity: 1,
            verification_status: status,
            image_url: None,
            flagged: status.flagged(),
            verified_at,
            verified_by: None,
            description: None,
        }
    }

    fn session(items: Vec<Item>) -> ReviewSession {
        ReviewSession::new(
            Checkout {
                id: 1,
                year_range: "2025-2026".to_string(),
                date: now(),
                owner_name: "Ari".to_string(),
                email: "ari@example.edu".to_string(),
                housing_assignment: None,
                graduation_year: None,
                needs_approval: true,
                notes: None,
            },
            items,
        )
    }

    #[test]
    fn test_mixed_session_shows_under_one_tab_only() {
        let s = session(vec![
            item(1, VerificationStatus::Flagged, Some(now())),
            item(2, VerificationStatus::Pending, None),
        ]);

        assert!(s.visible_under(VerificationStatus::Flagged, None));
        assert!(!s.visible_under(VerificationStatus::Pending, None));
        assert!(!s.visible_under(VerificationStatus::Approved, None));
    }

    #[test]
    fn test_approved_window_uses_latest_approval() {
        let cutoff = approved_cutoff(ApprovedWindow::Default, 30, now());
        let stale = session(vec![item(
            1,
            VerificationStatus::Approved,
            Some(now() - Duration::days(31)),
        )]);
        let fresh = session(vec![
            item(1, VerificationStatus::Approved, Some(now() - Duration::days(45))),
            item(2, VerificationStatus::Approved, Some(now() - Duration::days(2))),
        ]);

        assert!(!stale.visible_under(VerificationStatus::Approved, cutoff));
        assert!(stale.visible_under(VerificationStatus::Approved, None));
        assert!(fresh.visible_under(VerificationStatus::Approved, cutoff));
    }

    #[test]
    fn test_window_does_not_apply_to_other_tabs() {
        let cutoff = approved_cutoff(ApprovedWindow::Days(1), 30, now());
        let old_flag = session(vec![item(
            1,
            VerificationStatus::Flagged,
            Some(now() - Duration::days(300)),
        )]);
        assert!(old_flag.visible_under(VerificationStatus::Flagged, cutoff));
    }

    #[test]
    fn test_cutoff_for_oversized_window_is_unbounded() {
        assert_eq!(
            approved_cutoff(ApprovedWindow::Days(7), 30, now()),
            Some(now() - Duration::days(7))
        );
        assert_eq!(
            approved_cutoff(ApprovedWindow::Default, 30, now()),
            Some(now() - Duration::days(30))
        );
        assert_eq!(approved_cutoff(ApprovedWindow::Days(1_000_000_000_000), 30, now()), None);
        assert_eq!(approved_cutoff(ApprovedWindow::Days(i64::MAX), 30, now()), None);
    }

    #[test]
    fn test_stats_count_sessions_not_items() {
        let sessions = vec![
            session(vec![
                item(1, VerificationStatus::Pending, None),
                item(2, VerificationStatus::Pending, None),
            ]),
            session(vec![
                item(3, VerificationStatus::Approved, Some(now())),
                item(4, VerificationStatus::Flagged, Some(now())),
            ]),
            session(vec![]),
        ];

        assert_eq!(
            queue_stats(&sessions, None),
            QueueStats {
                pending: 2,
                approved: 0,
                flagged: 1,
            }
        );
    }

    #[test]
    fn test_item_update_flagged_resolution() {
        let approve = ItemStatusUpdate {
            status: Some(ReviewDecision::Approved),
            ..Default::default()
        };
        assert_eq!(approve.flagged_value(), Some(false));
        assert!(approve.stamps_verified_at());

        let flag = ItemStatusUpdate {
            status: Some(ReviewDecision::Flagged),
            ..Default::default()
        };
        assert_eq!(flag.flagged_value(), Some(true));

        let overridden = ItemStatusUpdate {
            status: Some(ReviewDecision::Approved),
            flagged: Some(true),
            ..Default::default()
        };
        assert_eq!(overridden.flagged_value(), Some(true));

        let photo_only = ItemStatusUpdate {
            image_url: Some("https://photos.example/1.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(photo_only.flagged_value(), None);
        assert!(!photo_only.stamps_verified_at());
        assert!(ItemStatusUpdate::default().is_empty());
    }
}
