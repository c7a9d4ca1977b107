//! The thin store interface consumed by the crawl loop.
//!
//! The crawler never touches `sqlx` directly; it talks to a [`CatalogStore`],
//! which keeps the loop testable against an in-memory implementation. The
//! production implementation is [`PgCatalog`], a plain delegating wrapper
//! around this crate's query functions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::items::NewItem;
use crate::prices::PricePointRow;
use crate::DbError;

/// Store operations needed by one crawl cycle. No business logic lives here;
/// the price-dedup rule is the persistence adapter's concern.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// The distinct brand names currently present among items.
    async fn distinct_brands(&self) -> Result<Vec<String>, DbError>;

    /// Idempotent upsert keyed on `link`; returns the item's internal id.
    async fn upsert_item(&self, item: &NewItem) -> Result<i64, DbError>;

    /// The latest price point for `item_id` captured after `since`, if any.
    async fn find_recent_price(
        &self,
        item_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Option<PricePointRow>, DbError>;

    /// Append a price observation; returns the new row id.
    async fn insert_price(
        &self,
        item_id: i64,
        captured_at: DateTime<Utc>,
        currency_code: &str,
        price: Decimal,
    ) -> Result<i64, DbError>;
}

/// Postgres-backed [`CatalogStore`].
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn distinct_brands(&self) -> Result<Vec<String>, DbError> {
        crate::items::distinct_brands(&self.pool).await
    }

    async fn upsert_item(&self, item: &NewItem) -> Result<i64, DbError> {
        crate::items::upsert_item(&self.pool, item).await
    }

    async fn find_recent_price(
        &self,
        item_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Option<PricePointRow>, DbError> {
        crate::prices::find_recent_price(&self.pool, item_id, since).await
    }

    async fn insert_price(
        &self,
        item_id: i64,
        captured_at: DateTime<Utc>,
        currency_code: &str,
        price: Decimal,
    ) -> Result<i64, DbError> {
        crate::prices::insert_price(&self.pool, item_id, captured_at, currency_code, price).await
    }
}
