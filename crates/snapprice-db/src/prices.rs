//! Database operations for the `price_points` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `price_points` table. Rows are append-only: never mutated
/// or deleted once written.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PricePointRow {
    pub id: i64,
    pub item_id: i64,
    pub captured_at: DateTime<Utc>,
    pub currency_code: String,
    pub price: Decimal,
}

/// Returns the most recent price point for an item captured after `since`,
/// if one exists.
///
/// Ordered by `captured_at DESC, id DESC` so the first row is always the
/// latest even when two points share a timestamp. The caller uses this to
/// decide whether a new observation falls inside the dedup window.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_recent_price(
    pool: &PgPool,
    item_id: i64,
    since: DateTime<Utc>,
) -> Result<Option<PricePointRow>, DbError> {
    let row = sqlx::query_as::<_, PricePointRow>(
        "SELECT id, item_id, captured_at, currency_code, price \
         FROM price_points \
         WHERE item_id = $1 AND captured_at > $2 \
         ORDER BY captured_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(item_id)
    .bind(since)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a new price point and returns its `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_price(
    pool: &PgPool,
    item_id: i64,
    captured_at: DateTime<Utc>,
    currency_code: &str,
    price: Decimal,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO price_points (item_id, captured_at, currency_code, price) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(item_id)
    .bind(captured_at)
    .bind(currency_code)
    .bind(price)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns the total number of price point rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn price_point_count(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM price_points")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
