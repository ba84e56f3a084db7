use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::checkouts::models::{
    Checkout, ContactCorrection, CreateItem, Item, ItemCorrection, VerificationStatus,
};
use crate::features::verification::aggregator::session_status_of;
use crate::shared::validation::{not_blank, YEAR_RANGE_REGEX};

// =============================================================================
// RESPONSES
// =============================================================================

/// Response DTO for an item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponseDto {
    pub id: i64,
    pub checkout_id: i64,
    pub year_range: Option<String>,
    pub item_name: String,
    pub item_quantity: i64,
    pub verification_status: VerificationStatus,
    pub flagged: bool,
    pub image_url: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<String>,
    pub description: Option<String>,
}

impl From<Item> for ItemResponseDto {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            checkout_id: i.checkout_id,
            year_range: i.year_range,
            item_name: i.item_name,
            item_quantity: i.item_quantity,
            verification_status: i.verification_status,
            flagged: i.flagged,
            image_url: i.image_url,
            verified_at: i.verified_at,
            verified_by: i.verified_by,
            description: i.description,
        }
    }
}

/// Response DTO for a checkout session with its items and derived status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponseDto {
    pub id: i64,
    pub year_range: String,
    pub date: DateTime<Utc>,
    pub owner_name: String,
    pub email: String,
    pub housing_assignment: Option<String>,
    pub graduation_year: Option<String>,
    pub needs_approval: bool,
    pub notes: Option<String>,
    /// Derived from the items, never stored
    pub status: VerificationStatus,
    pub total_items: i64,
    /// Sorted by item id ascending
    pub items: Vec<ItemResponseDto>,
}

impl CheckoutResponseDto {
    pub fn from_parts(checkout: Checkout, mut items: Vec<Item>) -> Self {
        items.sort_by_key(|i| i.id);
        let status = session_status_of(&items);

        Self {
            id: checkout.id,
            year_range: checkout.year_range,
            date: checkout.date,
            owner_name: checkout.owner_name,
            email: checkout.email,
            housing_assignment: checkout.housing_assignment,
            graduation_year: checkout.graduation_year,
            needs_approval: checkout.needs_approval,
            notes: checkout.notes,
            status,
            total_items: items.len() as i64,
            items: items.into_iter().map(ItemResponseDto::from).collect(),
        }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// One item line of a recorded checkout
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItemDto {
    #[validate(custom(function = "not_blank"))]
    pub item_name: String,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub item_quantity: i64,

    pub description: Option<String>,
    pub image_url: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

impl From<CreateItemDto> for CreateItem {
    fn from(dto: CreateItemDto) -> Self {
        Self {
            item_name: dto.item_name.trim().to_string(),
            item_quantity: dto.item_quantity,
            description: dto.description,
            image_url: dto.image_url,
        }
    }
}

/// Request DTO for recording a checkout session in the bulk-import shape.
///
/// Sessions recorded this way are historical data and skip the review queue.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCheckoutDto {
    #[validate(regex(path = *YEAR_RANGE_REGEX, message = "must look like 2025-2026"))]
    pub year_range: String,

    /// Defaults to the time of the request
    pub date: Option<DateTime<Utc>>,

    #[validate(custom(function = "not_blank"))]
    pub owner_name: String,

    #[validate(custom(function = "not_blank"))]
    pub email: String,

    pub housing_assignment: Option<String>,
    pub graduation_year: Option<String>,
    pub notes: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<CreateItemDto>,
}

/// Request DTO for correcting owner/contact details
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateContactDto {
    #[validate(custom(function = "not_blank"))]
    pub owner_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub housing_assignment: Option<String>,
    pub graduation_year: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdateContactDto> for ContactCorrection {
    fn from(dto: UpdateContactDto) -> Self {
        Self {
            owner_name: dto.owner_name.map(|s| s.trim().to_string()),
            email: dto.email.map(|s| s.trim().to_string()),
            housing_assignment: dto.housing_assignment,
            graduation_year: dto.graduation_year,
            notes: dto.notes,
        }
    }
}

/// Request DTO for correcting item content
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItemContentDto {
    #[validate(custom(function = "not_blank"))]
    pub item_name: Option<String>,

    #[validate(range(min = 1, message = "must be at least 1"))]
    pub item_quantity: Option<i64>,

    pub description: Option<String>,
}

impl From<UpdateItemContentDto> for ItemCorrection {
    fn from(dto: UpdateItemContentDto) -> Self {
        Self {
            item_name: dto.item_name.map(|s| s.trim().to_string()),
            item_quantity: dto.item_quantity,
            description: dto.description,
        }
    }
}
