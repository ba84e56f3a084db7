use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::checkouts::dtos::{CheckoutResponseDto, ItemResponseDto};
use crate::features::checkouts::models::{ReviewDecision, VerificationStatus};
use crate::features::verification::models::{
    ApprovedWindow, ItemStatusUpdate, QueueItem, QueueQuery, QueueStats, SessionStatusUpdate,
    SessionUpdateOutcome,
};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_APPROVED_WINDOW_DAYS};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{flatten_errors, YEAR_RANGE_REGEX};

// =============================================================================
// QUERY PARAMS
// =============================================================================

/// Query parameters shared by the session and item queues
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerificationQueryParams {
    /// Queue tab: pending, approved or flagged
    pub status: Option<String>,

    /// Academic year, e.g. 2025-2026
    pub year: Option<String>,

    /// Page number (1-indexed, default: 1)
    pub page: Option<i64>,

    /// Entries per page (default: 10, max: 100)
    pub limit: Option<i64>,

    /// Only show approvals from the recent window (default: true)
    #[serde(rename = "lastMonthOnly")]
    pub last_month_only: Option<bool>,

    /// Width of the approved window in days, overriding the configured default
    #[serde(rename = "windowDays")]
    pub window_days: Option<i64>,
}

impl TryFrom<VerificationQueryParams> for QueueQuery {
    type Error = AppError;

    fn try_from(params: VerificationQueryParams) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let status = match params.status.as_deref().map(str::parse::<VerificationStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(e)) => {
                errors.push(format!("status: {}", e));
                None
            }
            None => {
                errors.push("status: is required".to_string());
                None
            }
        };

        let year_range = params
            .year
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty());
        if let Some(year) = &year_range {
            if !YEAR_RANGE_REGEX.is_match(year) {
                errors.push("year: must look like 2025-2026".to_string());
            }
        }

        let pagination = PaginationQuery::new(
            params.page.unwrap_or(1),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        if let Err(e) = pagination.validate() {
            errors.extend(flatten_errors(&e));
        }

        let approved_window = match (params.last_month_only.unwrap_or(true), params.window_days) {
            (false, _) => ApprovedWindow::Unbounded,
            (true, Some(days)) if !(1..=MAX_APPROVED_WINDOW_DAYS).contains(&days) => {
                errors.push(format!(
                    "windowDays: must be between 1 and {}",
                    MAX_APPROVED_WINDOW_DAYS
                ));
                ApprovedWindow::Default
            }
            (true, Some(days)) => ApprovedWindow::Days(days),
            (true, None) => ApprovedWindow::Default,
        };

        match status {
            Some(status) if errors.is_empty() => Ok(QueueQuery {
                status,
                year_range,
                approved_window,
                pagination,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Session counts per queue tab
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueueStatsDto {
    pub pending: i64,
    pub approved: i64,
    pub flagged: i64,
}

impl From<QueueStats> for QueueStatsDto {
    fn from(s: QueueStats) -> Self {
        Self {
            pending: s.pending,
            approved: s.approved,
            flagged: s.flagged,
        }
    }
}

/// One page of the session queue
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationCheckoutListDto {
    pub checkouts: Vec<CheckoutResponseDto>,
    pub stats: QueueStatsDto,
    pub page: i64,
    pub limit: i64,
}

/// An item in the item queue with the context of its session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationItemDto {
    #[serde(flatten)]
    pub item: ItemResponseDto,
    pub owner_name: String,
    pub email: String,
    pub checkout_date: DateTime<Utc>,
    pub checkout_status: VerificationStatus,
}

impl From<QueueItem> for VerificationItemDto {
    fn from(q: QueueItem) -> Self {
        Self {
            item: q.item.into(),
            owner_name: q.checkout.owner_name,
            email: q.checkout.email,
            checkout_date: q.checkout.date,
            checkout_status: q.checkout_status,
        }
    }
}

/// One page of the item queue
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationItemListDto {
    pub items: Vec<VerificationItemDto>,
    pub stats: QueueStatsDto,
    pub page: i64,
    pub limit: i64,
}

/// Result of a session-level decision
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusResultDto {
    pub checkout_id: i64,
    pub status: VerificationStatus,
    pub items_updated: u64,
    pub outcome: SessionUpdateOutcome,
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Request DTO for approving or flagging a whole session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCheckoutStatusDto {
    /// approved or flagged
    pub status: String,
    /// Reviewer identity recorded on every item
    pub verified_by: Option<String>,
}

impl TryFrom<UpdateCheckoutStatusDto> for SessionStatusUpdate {
    type Error = AppError;

    fn try_from(dto: UpdateCheckoutStatusDto) -> Result<Self, Self::Error> {
        let decision = dto
            .status
            .parse::<ReviewDecision>()
            .map_err(|e| AppError::invalid_field("status", &e))?;

        Ok(Self {
            decision,
            actor: non_empty(dto.verified_by),
        })
    }
}

/// Request DTO for a single-item verification change
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateItemStatusDto {
    /// approved or flagged
    #[serde(alias = "verification_status")]
    pub status: Option<String>,
    /// Overrides the value derived from `status`
    pub flagged: Option<bool>,
    pub verified_by: Option<String>,
    pub image_url: Option<String>,
    /// Refresh verified_at without changing the status
    #[serde(default)]
    pub stamp_verified_at: bool,
}

impl TryFrom<UpdateItemStatusDto> for ItemStatusUpdate {
    type Error = AppError;

    fn try_from(dto: UpdateItemStatusDto) -> Result<Self, Self::Error> {
        let status = dto
            .status
            .as_deref()
            .map(str::parse::<ReviewDecision>)
            .transpose()
            .map_err(|e| AppError::invalid_field("status", &e))?;

        Ok(Self {
            status,
            flagged: dto.flagged,
            verified_by: non_empty(dto.verified_by),
            image_url: non_empty(dto.image_url),
            stamp_verified_at: dto.stamp_verified_at,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
