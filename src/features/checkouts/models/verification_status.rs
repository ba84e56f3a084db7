use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Verification state of a single item, stored as lowercase text
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Flagged,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 3] = [
        VerificationStatus::Pending,
        VerificationStatus::Approved,
        VerificationStatus::Flagged,
    ];

    /// Value of the denormalized `items.flagged` column for this status.
    ///
    /// Every write of `verification_status` derives `flagged` from here.
    pub fn flagged(self) -> bool {
        matches!(self, VerificationStatus::Flagged)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Flagged => "flagged",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "approved" => Ok(VerificationStatus::Approved),
            "flagged" => Ok(VerificationStatus::Flagged),
            other => Err(format!(
                "unknown status '{}', expected pending, approved or flagged",
                other
            )),
        }
    }
}

/// Outcome a reviewer may record. `pending` is only ever set at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approved,
    Flagged,
}

impl From<ReviewDecision> for VerificationStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => VerificationStatus::Approved,
            ReviewDecision::Flagged => VerificationStatus::Flagged,
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<VerificationStatus>()? {
            VerificationStatus::Approved => Ok(ReviewDecision::Approved),
            VerificationStatus::Flagged => Ok(ReviewDecision::Flagged),
            VerificationStatus::Pending => {
                Err("cannot be set back to pending, expected approved or flagged".to_string())
            }
        }
    }
}
