use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::core::config::VerificationConfig;
use crate::core::error::{AppError, Result};
use crate::features::checkouts::models::{Checkout, Item, VerificationStatus};
use crate::features::checkouts::services::queries::{self, CHECKOUT_COLUMNS, ITEM_COLUMNS};
use crate::features::verification::models::{
    approved_cutoff, approved_since, queue_stats, ItemPage, ItemStatusUpdate, QueueItem,
    QueueQuery, ReviewSession, SessionPage, SessionStatusUpdate, SessionUpdateOutcome,
};

/// Service for the reviewer queue and verification decisions
pub struct VerificationService {
    pool: SqlitePool,
    config: VerificationConfig,
}

impl VerificationService {
    pub fn new(pool: SqlitePool, config: VerificationConfig) -> Self {
        Self { pool, config }
    }

    /// Sessions whose derived status matches `query.status`, newest first
    pub async fn list_sessions_by_status(
        &self,
        query: &QueueQuery,
        now: DateTime<Utc>,
    ) -> Result<SessionPage> {
        let sessions = self.load_review_sessions(query.year_range.as_deref()).await?;
        let cutoff = approved_cutoff(query.approved_window, self.config.approved_window_days, now);
        let stats = queue_stats(&sessions, cutoff);

        let visible: Vec<ReviewSession> = sessions
            .into_iter()
            .filter(|s| s.visible_under(query.status, cutoff))
            .collect();
        let total = visible.len() as i64;

        let sessions = visible
            .into_iter()
            .skip(query.pagination.offset())
            .take(query.pagination.page_size() as usize)
            .collect();

        Ok(SessionPage {
            sessions,
            total,
            stats,
        })
    }

    /// Items whose own status matches `query.status`, taken from the sessions
    /// visible under that tab so both listings agree with the session stats
    pub async fn list_items_by_status(
        &self,
        query: &QueueQuery,
        now: DateTime<Utc>,
    ) -> Result<ItemPage> {
        let sessions = self.load_review_sessions(query.year_range.as_deref()).await?;
        let cutoff = approved_cutoff(query.approved_window, self.config.approved_window_days, now);
        let stats = queue_stats(&sessions, cutoff);

        let mut matching = Vec::new();
        for session in sessions {
            if !session.visible_under(query.status, cutoff) {
                continue;
            }
            let checkout_status = session.status;
            for item in session.items {
                if item.verification_status != query.status {
                    continue;
                }
                if let (VerificationStatus::Approved, Some(cutoff)) = (query.status, cutoff) {
                    if !approved_since(&item, cutoff) {
                        continue;
                    }
                }
                matching.push(QueueItem {
                    item,
                    checkout: session.checkout.clone(),
                    checkout_status,
                });
            }
        }
        let total = matching.len() as i64;

        let items = matching
            .into_iter()
            .skip(query.pagination.offset())
            .take(query.pagination.page_size() as usize)
            .collect();

        Ok(ItemPage {
            items,
            total,
            stats,
        })
    }

    /// Apply one decision to every item of a session in a single statement.
    ///
    /// Returns how many items were written. A session with no items yields
    /// `NoItems`; an unknown session is `NotFound`.
    pub async fn set_session_status(
        &self,
        checkout_id: i64,
        update: &SessionStatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<(u64, SessionUpdateOutcome)> {
        let status = VerificationStatus::from(update.decision);

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin session status transaction: {:?}", e);
            AppError::Database(e)
        })?;

        // Write first so the transaction holds the write lock before it reads
        let result = sqlx::query(
            r#"
            UPDATE items
            SET
                verification_status = ?,
                flagged = ?,
                verified_at = ?,
                verified_by = COALESCE(?, verified_by)
            WHERE checkout_id = ?
            "#,
        )
        .bind(status)
        .bind(status.flagged())
        .bind(now)
        .bind(&update.actor)
        .bind(checkout_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update items of checkout {}: {:?}", checkout_id, e);
            AppError::Database(e)
        })?;

        let items_updated = result.rows_affected();
        if items_updated == 0 {
            let exists = queries::find_checkout(&mut *tx, checkout_id)
                .await
                .map_err(AppError::Database)?
                .is_some();
            if !exists {
                return Err(AppError::NotFound(format!(
                    "Checkout {} not found",
                    checkout_id
                )));
            }
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit status of checkout {}: {:?}", checkout_id, e);
            AppError::Database(e)
        })?;

        if items_updated == 0 {
            tracing::warn!(
                "Checkout {} has no items, nothing set to {}",
                checkout_id,
                status
            );
            return Ok((0, SessionUpdateOutcome::NoItems));
        }

        tracing::info!(
            "Set checkout {} to {}: items_updated={}, verified_by={:?}",
            checkout_id,
            status,
            items_updated,
            update.actor
        );

        Ok((items_updated, SessionUpdateOutcome::Updated))
    }

    /// Apply a reviewer change to one item; absent fields keep their value
    pub async fn set_item_status(
        &self,
        item_id: i64,
        update: &ItemStatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<Item> {
        if update.is_empty() {
            return Err(AppError::invalid_field("body", "no fields to update"));
        }

        let status = update.status.map(VerificationStatus::from);

        let item = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET
                verification_status = COALESCE(?, verification_status),
                flagged = COALESCE(?, flagged),
                verified_at = CASE WHEN ? THEN ? ELSE verified_at END,
                verified_by = COALESCE(?, verified_by),
                image_url = COALESCE(?, image_url)
            WHERE id = ?
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(status)
        .bind(update.flagged_value())
        .bind(update.stamps_verified_at())
        .bind(now)
        .bind(&update.verified_by)
        .bind(&update.image_url)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update item {} status: {:?}", item_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", item_id)))?;

        tracing::info!(
            "Updated item {}: status={}, flagged={}",
            item.id,
            item.verification_status,
            item.flagged
        );

        Ok(item)
    }

    /// Every session awaiting review (optionally one academic year) with its
    /// items, read in one transaction and ordered by date then id, newest first
    async fn load_review_sessions(&self, year_range: Option<&str>) -> Result<Vec<ReviewSession>> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let checkouts = sqlx::query_as::<_, Checkout>(&format!(
            r#"
            SELECT {}
            FROM checkouts
            WHERE needs_approval = 1 AND (?1 IS NULL OR year_range = ?1)
            ORDER BY date DESC, id DESC
            "#,
            CHECKOUT_COLUMNS
        ))
        .bind(year_range)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list checkouts under review: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, Item>(&format!(
            r#"
            SELECT {}
            FROM items
            WHERE checkout_id IN (
                SELECT id FROM checkouts
                WHERE needs_approval = 1 AND (?1 IS NULL OR year_range = ?1)
            )
            "#,
            ITEM_COLUMNS
        ))
        .bind(year_range)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list items under review: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        let mut by_checkout: HashMap<i64, Vec<Item>> = HashMap::new();
        for item in items {
            by_checkout.entry(item.checkout_id).or_default().push(item);
        }

        let sessions: Vec<ReviewSession> = checkouts
            .into_iter()
            .map(|checkout| {
                let items = by_checkout.remove(&checkout.id).unwrap_or_default();
                ReviewSession::new(checkout, items)
            })
            .collect();

        Ok(sessions)
    }
}
