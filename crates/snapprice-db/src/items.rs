//! Database operations for the `items` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub link: String,
    pub title: String,
    pub brand: String,
    pub images: Vec<String>,
    pub source: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields written on every item upsert.
///
/// `link` is the natural key: the storefront exposes no stable item id, so
/// the canonical listing URL identifies an item across crawls.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub link: String,
    pub title: String,
    pub brand: String,
    pub images: Vec<String>,
    pub source: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Upserts an item row by its `link` natural key.
///
/// Conflicts on `link` update `title`, `brand`, `images`, `source`, and
/// `updated_at` in place; items are never deleted by the crawler.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_item(pool: &PgPool, item: &NewItem) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO items (link, title, brand, images, source) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (link) DO UPDATE SET \
             title      = EXCLUDED.title, \
             brand      = EXCLUDED.brand, \
             images     = EXCLUDED.images, \
             source     = EXCLUDED.source, \
             updated_at = NOW() \
         RETURNING id",
    )
    .bind(&item.link)
    .bind(&item.title)
    .bind(&item.brand)
    .bind(&item.images)
    .bind(&item.source)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns a single item by its `link`, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_item_by_link(pool: &PgPool, link: &str) -> Result<Option<ItemRow>, DbError> {
    let row = sqlx::query_as::<_, ItemRow>(
        "SELECT id, link, title, brand, images, source, updated_at, created_at \
         FROM items \
         WHERE link = $1",
    )
    .bind(link)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns the distinct set of brand names present among items, ordered by name.
///
/// This is the seed set for brand selection; it is a view over `items`, not
/// an owned table.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn distinct_brands(pool: &PgPool) -> Result<Vec<String>, DbError> {
    let brands = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT brand FROM items ORDER BY brand",
    )
    .fetch_all(pool)
    .await?;

    Ok(brands)
}

/// Returns the total number of item rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn item_count(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
