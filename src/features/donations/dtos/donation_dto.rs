use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::not_blank;

/// Donation form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogDonationDto {
    #[validate(custom(function = "not_blank"))]
    pub donor_name: String,

    #[validate(
        custom(function = "not_blank"),
        email(message = "Invalid email format")
    )]
    pub email: String,

    pub housing: Option<String>,
    pub grad_year: Option<String>,

    /// Becomes the item name
    #[validate(custom(function = "not_blank"))]
    pub category_name: String,

    pub description: Option<String>,
    pub photo_url: Option<String>,
}

/// Identifiers of the recorded donation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DonationResponseDto {
    pub session_id: i64,
    pub item_id: i64,
}
