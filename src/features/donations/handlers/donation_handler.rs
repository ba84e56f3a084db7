use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::donations::dtos::{DonationResponseDto, LogDonationDto};
use crate::features::donations::models::Donation;
use crate::features::donations::services::DonationService;
use crate::shared::types::ApiResponse;

/// Log a donated item from the product form
///
/// The donation enters the review queue as a pending single-item session.
#[utoipa::path(
    post,
    path = "/products",
    request_body = LogDonationDto,
    responses(
        (status = 201, description = "Donation logged", body = ApiResponse<DonationResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "donations"
)]
pub async fn log_donation(
    State(service): State<Arc<DonationService>>,
    AppJson(dto): AppJson<LogDonationDto>,
) -> Result<(StatusCode, Json<ApiResponse<DonationResponseDto>>)> {
    dto.validate()?;

    let created = service
        .log_donation(&Donation::from(dto), Utc::now())
        .await?;

    let data = DonationResponseDto {
        session_id: created.checkout_id,
        item_id: created.item_ids.first().copied().unwrap_or_default(),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(data),
            Some("Donation logged".to_string()),
            None,
        )),
    ))
}
