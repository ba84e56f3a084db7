//! Session-level status derived from item statuses.
//!
//! The session status is never stored. Every read that needs it recomputes it
//! from the current items with [`derive_session_status`].

use crate::features::checkouts::models::{Item, VerificationStatus};

/// Collapses the statuses of one session's items into a single status.
///
/// Priority, first match wins:
/// 1. any `flagged` item makes the session `flagged`
/// 2. a non-empty set of only `approved` items makes it `approved`
/// 3. everything else (including no items at all) is `pending`
pub fn derive_session_status<I>(statuses: I) -> VerificationStatus
where
    I: IntoIterator<Item = VerificationStatus>,
{
    let mut seen_any = false;
    let mut all_approved = true;

    for status in statuses {
        seen_any = true;
        match status {
            VerificationStatus::Flagged => return VerificationStatus::Flagged,
            VerificationStatus::Approved => {}
            VerificationStatus::Pending => all_approved = false,
        }
    }

    if seen_any && all_approved {
        VerificationStatus::Approved
    } else {
        VerificationStatus::Pending
    }
}

/// [`derive_session_status`] over item rows
pub fn session_status_of(items: &[Item]) -> VerificationStatus {
    derive_session_status(items.iter().map(|item| item.verification_status))
}
