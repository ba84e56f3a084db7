use utoipa::{Modify, OpenApi};

use crate::features::checkouts::{
    dtos as checkouts_dtos, handlers as checkouts_handlers, models as checkouts_models,
};
use crate::features::donations::{dtos as donations_dtos, handlers as donations_handlers};
use crate::features::verification::{
    dtos as verification_dtos, handlers as verification_handlers,
    models as verification_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Donations (public form)
        donations_handlers::log_donation,
        // Checkouts
        checkouts_handlers::create_checkout,
        checkouts_handlers::get_checkout,
        checkouts_handlers::update_checkout_contact,
        checkouts_handlers::update_item_content,
        // Verification queue
        verification_handlers::list_checkouts,
        verification_handlers::update_checkout_status,
        verification_handlers::list_items,
        verification_handlers::update_item_status,
    ),
    components(
        schemas(
            Meta,
            checkouts_models::VerificationStatus,
            verification_models::SessionUpdateOutcome,
            // Donations
            donations_dtos::LogDonationDto,
            donations_dtos::DonationResponseDto,
            ApiResponse<donations_dtos::DonationResponseDto>,
            // Checkouts
            checkouts_dtos::ItemResponseDto,
            checkouts_dtos::CheckoutResponseDto,
            checkouts_dtos::CreateItemDto,
            checkouts_dtos::CreateCheckoutDto,
            checkouts_dtos::UpdateContactDto,
            checkouts_dtos::UpdateItemContentDto,
            ApiResponse<checkouts_dtos::CheckoutResponseDto>,
            ApiResponse<checkouts_dtos::ItemResponseDto>,
            // Verification
            verification_dtos::QueueStatsDto,
            verification_dtos::VerificationCheckoutListDto,
            verification_dtos::VerificationItemDto,
            verification_dtos::VerificationItemListDto,
            verification_dtos::SessionStatusResultDto,
            verification_dtos::UpdateCheckoutStatusDto,
            verification_dtos::UpdateItemStatusDto,
            ApiResponse<verification_dtos::VerificationCheckoutListDto>,
            ApiResponse<verification_dtos::VerificationItemListDto>,
            ApiResponse<verification_dtos::SessionStatusResultDto>,
        )
    ),
    tags(
        (name = "donations", description = "Donation form intake (public)"),
        (name = "checkouts", description = "Checkout sessions and item corrections"),
        (name = "verification", description = "Reviewer queue for donated items"),
    ),
    info(
        title = "ReUSE Store API",
        version = "0.1.0",
        description = "Donation logging and verification API for the ReUSE Store",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
