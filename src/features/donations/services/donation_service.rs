use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::checkouts::models::CreateItem;
use crate::features::checkouts::services::{queries, CreatedCheckout};
use crate::features::donations::models::Donation;
use crate::shared::academic_year::academic_year_range;

/// Service for donations submitted through the product form
pub struct DonationService {
    pool: SqlitePool,
}

impl DonationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a donation as a single-item session awaiting review
    pub async fn log_donation(&self, donation: &Donation, now: DateTime<Utc>) -> Result<CreatedCheckout> {
        if donation.owner_name.is_empty() {
            return Err(AppError::invalid_field("donor_name", "must not be empty"));
        }
        if donation.email.is_empty() {
            return Err(AppError::invalid_field("email", "must not be empty"));
        }
        if donation.category_name.is_empty() {
            return Err(AppError::invalid_field("category_name", "must not be empty"));
        }

        let year_range = academic_year_range(now);
        let item = CreateItem {
            item_name: donation.category_name.clone(),
            item_quantity: 1,
            description: donation.description.clone(),
            image_url: donation.photo_url.clone(),
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin donation transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let checkout_id = queries::insert_checkout(
            &mut *tx,
            &year_range,
            now,
            &donation.owner_name,
            &donation.email,
            donation.housing.as_deref(),
            donation.grad_year.as_deref(),
            true,
            None,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to create donation session: {:?}", e);
            AppError::Database(e)
        })?;

        let item_id = queries::insert_item(&mut *tx, checkout_id, &year_range, &item)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create donated item: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit donation {}: {:?}", checkout_id, e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Logged donation: session={}, item={}, year_range={}",
            checkout_id,
            item_id,
            year_range
        );

        Ok(CreatedCheckout {
            checkout_id,
            item_ids: vec![item_id],
        })
    }
}
