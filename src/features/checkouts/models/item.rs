use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::VerificationStatus;

/// Database model for a donated/checked-out item
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub checkout_id: i64,
    pub year_range: Option<String>,
    pub item_name: String,
    pub item_quantity: i64,
    pub verification_status: VerificationStatus,
    pub image_url: Option<String>,
    pub flagged: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<String>,
    pub description: Option<String>,
}

/// Data for creating an item; new items always start `pending`
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub item_name: String,
    pub item_quantity: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Content correction of an item. Verification fields are out of reach here.
#[derive(Debug, Clone, Default)]
pub struct ItemCorrection {
    pub item_name: Option<String>,
    pub item_quantity: Option<i64>,
    pub description: Option<String>,
}

impl ItemCorrection {
    pub fn is_empty(&self) -> bool {
        self.item_name.is_none() && self.item_quantity.is_none() && self.description.is_none()
    }
}
