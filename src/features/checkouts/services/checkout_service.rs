use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::checkouts::models::{
    Checkout, ContactCorrection, CreateCheckout, Item, ItemCorrection,
};
use crate::features::checkouts::services::queries::{self, CHECKOUT_COLUMNS, ITEM_COLUMNS};

/// Identifiers of a freshly recorded session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCheckout {
    pub checkout_id: i64,
    pub item_ids: Vec<i64>,
}

/// Service for checkout sessions and item content
pub struct CheckoutService {
    pool: SqlitePool,
}

impl CheckoutService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a session and all of its items in one transaction
    pub async fn create(&self, data: &CreateCheckout) -> Result<CreatedCheckout> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin checkout transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let checkout_id = queries::insert_checkout(
            &mut *tx,
            &data.year_range,
            data.date,
            &data.owner_name,
            &data.email,
            data.housing_assignment.as_deref(),
            data.graduation_year.as_deref(),
            data.needs_approval,
            data.notes.as_deref(),
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to create checkout: {:?}", e);
            AppError::Database(e)
        })?;

        let mut item_ids = Vec::with_capacity(data.items.len());
        for item in &data.items {
            let id = queries::insert_item(&mut *tx, checkout_id, &data.year_range, item)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create item for checkout {}: {:?}", checkout_id, e);
                    AppError::Database(e)
                })?;
            item_ids.push(id);
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit checkout {}: {:?}", checkout_id, e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created checkout: id={}, items={}, needs_approval={}",
            checkout_id,
            item_ids.len(),
            data.needs_approval
        );

        Ok(CreatedCheckout {
            checkout_id,
            item_ids,
        })
    }

    /// Get a session and its items (sorted by id)
    pub async fn get_with_items(&self, id: i64) -> Result<(Checkout, Vec<Item>)> {
        // One read transaction so the items match the session row
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let checkout = queries::find_checkout(&mut *tx, id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get checkout: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Checkout {} not found", id)))?;

        let items = queries::items_of_checkout(&mut *tx, id).await.map_err(|e| {
            tracing::error!("Failed to get items of checkout {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok((checkout, items))
    }

    /// Correct owner/contact details; absent fields keep their value
    pub async fn update_contact(&self, id: i64, correction: &ContactCorrection) -> Result<Checkout> {
        if correction.is_empty() {
            return Err(AppError::invalid_field("body", "no fields to update"));
        }

        let checkout = sqlx::query_as::<_, Checkout>(&format!(
            r#"
            UPDATE checkouts
            SET
                owner_name = COALESCE(?, owner_name),
                email = COALESCE(?, email),
                housing_assignment = COALESCE(?, housing_assignment),
                graduation_year = COALESCE(?, graduation_year),
                notes = COALESCE(?, notes)
            WHERE id = ?
            RETURNING {}
            "#,
            CHECKOUT_COLUMNS
        ))
        .bind(&correction.owner_name)
        .bind(&correction.email)
        .bind(&correction.housing_assignment)
        .bind(&correction.graduation_year)
        .bind(&correction.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update checkout contact: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Checkout {} not found", id)))?;

        tracing::info!("Corrected contact details of checkout {}", checkout.id);
        Ok(checkout)
    }

    /// Correct item name, quantity or description. Verification state is untouched.
    pub async fn update_item_content(&self, id: i64, correction: &ItemCorrection) -> Result<Item> {
        if correction.is_empty() {
            return Err(AppError::invalid_field("body", "no fields to update"));
        }

        sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET
                item_name = COALESCE(?, item_name),
                item_quantity = COALESCE(?, item_quantity),
                description = COALESCE(?, description)
            WHERE id = ?
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&correction.item_name)
        .bind(correction.item_quantity)
        .bind(&correction.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update item content: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::create_test_pool;
    use crate::features::checkouts::models::VerificationStatus;
    use crate::shared::test_helpers::bulk_checkout;

    #[tokio::test]
    async fn test_create_inserts_session_and_pending_items() {
        let service = CheckoutService::new(create_test_pool().await);

        let created = tokio_test::assert_ok!(
            service
                .create(&bulk_checkout(&["Desk lamp", "Hangers", "Rug"]))
                .await
        );
        assert_eq!(created.item_ids.len(), 3);

        let (checkout, items) = service.get_with_items(created.checkout_id).await.unwrap();
        assert!(!checkout.needs_approval);
        assert_eq!(checkout.year_range, "2024-2025");
        assert_eq!(items.len(), 3);
        for item in &items {
            assert_eq!(item.verification_status, VerificationStatus::Pending);
            assert!(!item.flagged);
            assert!(item.verified_at.is_none());
            assert_eq!(item.item_quantity, 2);
            assert_eq!(item.year_range.as_deref(), Some("2024-2025"));
        }
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, created.item_ids);
    }

    #[tokio::test]
    async fn test_zero_item_session_is_legal() {
        let service = CheckoutService::new(create_test_pool().await);
        let created = service.create(&bulk_checkout(&[])).await.unwrap();

        let (_, items) = service.get_with_items(created.checkout_id).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_failed_item_insert_rolls_back_whole_session() {
        let pool = create_test_pool().await;
        let service = CheckoutService::new(pool.clone());

        let mut data = bulk_checkout(&["Lamp", "Rug"]);
        data.items[1].item_quantity = 0;

        let result = service.create(&data).await;
        assert!(matches!(result, Err(AppError::Database(_))));

        let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM checkouts")
            .fetch_one(&pool)
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sessions, 0);
        assert_eq!(items, 0);
    }

    #[tokio::test]
    async fn test_get_unknown_checkout_is_not_found() {
        let service = CheckoutService::new(create_test_pool().await);
        let result = service.get_with_items(404).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_contact_keeps_absent_fields() {
        let service = CheckoutService::new(create_test_pool().await);
        let created = service.create(&bulk_checkout(&["Rug"])).await.unwrap();

        let updated = service
            .update_contact(
                created.checkout_id,
                &ContactCorrection {
                    email: Some("new@example.edu".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "new@example.edu");
        assert_eq!(updated.housing_assignment.as_deref(), Some("North Hall"));
    }

    #[tokio::test]
    async fn test_update_contact_rejects_empty_and_unknown() {
        let service = CheckoutService::new(create_test_pool().await);

        let empty = service.update_contact(1, &ContactCorrection::default()).await;
        assert!(matches!(empty, Err(AppError::Validation(_))));

        let missing = service
            .update_contact(
                99,
                &ContactCorrection {
                    notes: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_item_content_leaves_verification_alone() {
        let pool = create_test_pool().await;
        let service = CheckoutService::new(pool.clone());
        let created = service.create(&bulk_checkout(&["Rug"])).await.unwrap();
        let item_id = created.item_ids[0];

        sqlx::query("UPDATE items SET verification_status = 'flagged', flagged = 1 WHERE id = ?")
            .bind(item_id)
            .execute(&pool)
            .await
            .unwrap();

        let item = service
            .update_item_content(
                item_id,
                &ItemCorrection {
                    item_quantity: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(item.item_quantity, 5);
        assert_eq!(item.item_name, "Rug");
        assert_eq!(item.verification_status, VerificationStatus::Flagged);
        assert!(item.flagged);
        assert_eq!(item.checkout_id, created.checkout_id);
    }

    #[tokio::test]
    async fn test_deleting_session_cascades_to_items() {
        let pool = create_test_pool().await;
        let service = CheckoutService::new(pool.clone());
        let created = service.create(&bulk_checkout(&["Rug", "Lamp"])).await.unwrap();

        sqlx::query("DELETE FROM checkouts WHERE id = ?")
            .bind(created.checkout_id)
            .execute(&pool)
            .await
            .unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
