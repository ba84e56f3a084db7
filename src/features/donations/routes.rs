use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::donations::handlers;
use crate::features::donations::services::DonationService;

/// Create routes for the donation form
pub fn routes(service: Arc<DonationService>) -> Router {
    Router::new()
        .route("/products", post(handlers::log_donation))
        .with_state(service)
}
