use chrono::{DateTime, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::SqlitePool;

use crate::features::checkouts::models::{CreateCheckout, CreateItem};

/// Fixed "now" for deterministic tests
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
}

fn items(item_names: &[&str]) -> Vec<CreateItem> {
    item_names
        .iter()
        .map(|name| CreateItem {
            item_name: name.to_string(),
            item_quantity: 2,
            description: None,
            image_url: None,
        })
        .collect()
}

/// Session in the shape the bulk CSV import produces (not subject to review)
pub fn bulk_checkout(item_names: &[&str]) -> CreateCheckout {
    CreateCheckout {
        year_range: "2024-2025".to_string(),
        date: Utc.with_ymd_and_hms(2025, 3, 2, 9, 30, 0).unwrap(),
        owner_name: Name().fake(),
        email: SafeEmail().fake(),
        housing_assignment: Some("North Hall".to_string()),
        graduation_year: Some("2027".to_string()),
        needs_approval: false,
        notes: None,
        items: items(item_names),
    }
}

/// Session awaiting review, created at `date`
pub fn review_checkout(date: DateTime<Utc>, item_names: &[&str]) -> CreateCheckout {
    CreateCheckout {
        year_range: "2025-2026".to_string(),
        date,
        owner_name: Name().fake(),
        email: SafeEmail().fake(),
        housing_assignment: None,
        graduation_year: None,
        needs_approval: true,
        notes: None,
        items: items(item_names),
    }
}

/// Forces an item's verification columns, bypassing the services
pub async fn force_item_status(
    pool: &SqlitePool,
    item_id: i64,
    status: &str,
    verified_at: Option<DateTime<Utc>>,
) {
    sqlx::query(
        "UPDATE items SET verification_status = ?, flagged = (? = 'flagged'), verified_at = ? WHERE id = ?",
    )
    .bind(status)
    .bind(status)
    .bind(verified_at)
    .bind(item_id)
    .execute(pool)
    .await
    .expect("force item status");
}
