//! Row-level reads and writes on `checkouts` and `items`.
//!
//! Every function takes an executor so it can run on the pool or inside an
//! open transaction.

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use crate::features::checkouts::models::{Checkout, CreateItem, Item, VerificationStatus};

pub const CHECKOUT_COLUMNS: &str = "id, year_range, date, owner_name, email, housing_assignment, \
     graduation_year, needs_approval, notes";

pub const ITEM_COLUMNS: &str = "id, checkout_id, year_range, item_name, item_quantity, \
     verification_status, image_url, flagged, verified_at, verified_by, description";

pub async fn find_checkout<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Checkout>, sqlx::Error> {
    sqlx::query_as::<_, Checkout>(&format!(
        "SELECT {} FROM checkouts WHERE id = ?",
        CHECKOUT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn find_item<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(&format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Items of one session, ordered by id
pub async fn items_of_checkout<'e>(
    executor: impl SqliteExecutor<'e>,
    checkout_id: i64,
) -> Result<Vec<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(&format!(
        "SELECT {} FROM items WHERE checkout_id = ? ORDER BY id ASC",
        ITEM_COLUMNS
    ))
    .bind(checkout_id)
    .fetch_all(executor)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_checkout<'e>(
    executor: impl SqliteExecutor<'e>,
    year_range: &str,
    date: DateTime<Utc>,
    owner_name: &str,
    email: &str,
    housing_assignment: Option<&str>,
    graduation_year: Option<&str>,
    needs_approval: bool,
    notes: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO checkouts (
            year_range, date, owner_name, email, housing_assignment,
            graduation_year, needs_approval, notes
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(year_range)
    .bind(date)
    .bind(owner_name)
    .bind(email)
    .bind(housing_assignment)
    .bind(graduation_year)
    .bind(needs_approval)
    .bind(notes)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Inserts a `pending`, unflagged item
pub async fn insert_item<'e>(
    executor: impl SqliteExecutor<'e>,
    checkout_id: i64,
    year_range: &str,
    item: &CreateItem,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO items (
            checkout_id, year_range, item_name, item_quantity,
            verification_status, flagged, image_url, description
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(checkout_id)
    .bind(year_range)
    .bind(&item.item_name)
    .bind(item.item_quantity)
    .bind(VerificationStatus::Pending)
    .bind(VerificationStatus::Pending.flagged())
    .bind(&item.image_url)
    .bind(&item.description)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}
