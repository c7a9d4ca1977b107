//! In-memory [`CatalogStore`] used by the crawl and persistence tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use snapprice_db::{CatalogStore, DbError, NewItem, PricePointRow};

#[derive(Debug, Clone)]
pub(crate) struct StoredItem {
    pub id: i64,
    pub item: NewItem,
}

/// Cheap-to-clone shared store; clones observe the same state, so a test can
/// hand one clone to the crawler and inspect another afterwards.
#[derive(Clone, Default)]
pub(crate) struct MemStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    brands: Mutex<Vec<String>>,
    items: Mutex<Vec<StoredItem>>,
    prices: Mutex<Vec<PricePointRow>>,
    fail_upserts: AtomicBool,
}

impl MemStore {
    pub fn with_brands(brands: &[&str]) -> Self {
        let store = Self::default();
        *store.inner.brands.lock().expect("brands lock") =
            brands.iter().map(|b| (*b).to_string()).collect();
        store
    }

    pub fn items(&self) -> Vec<StoredItem> {
        self.inner.items.lock().expect("items lock").clone()
    }

    pub fn prices(&self) -> Vec<PricePointRow> {
        self.inner.prices.lock().expect("prices lock").clone()
    }

    /// Rewrites the capture timestamp of an existing price point, e.g. to
    /// push it past the dedup window boundary.
    pub fn age_price(&self, price_id: i64, captured_at: DateTime<Utc>) {
        let mut prices = self.inner.prices.lock().expect("prices lock");
        let row = prices
            .iter_mut()
            .find(|p| p.id == price_id)
            .expect("price id should exist");
        row.captured_at = captured_at;
    }

    pub fn fail_upserts(&self) {
        self.inner.fail_upserts.store(true, Ordering::SeqCst);
    }
}

fn store_error() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolClosed)
}

#[async_trait]
impl CatalogStore for MemStore {
    async fn distinct_brands(&self) -> Result<Vec<String>, DbError> {
        Ok(self.inner.brands.lock().expect("brands lock").clone())
    }

    async fn upsert_item(&self, item: &NewItem) -> Result<i64, DbError> {
        if self.inner.fail_upserts.load(Ordering::SeqCst) {
            return Err(store_error());
        }
        let mut items = self.inner.items.lock().expect("items lock");
        if let Some(existing) = items.iter_mut().find(|s| s.item.link == item.link) {
            existing.item = item.clone();
            return Ok(existing.id);
        }
        let id = i64::try_from(items.len()).expect("store size") + 1;
        items.push(StoredItem {
            id,
            item: item.clone(),
        });
        Ok(id)
    }

    async fn find_recent_price(
        &self,
        item_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Option<PricePointRow>, DbError> {
        let prices = self.inner.prices.lock().expect("prices lock");
        Ok(prices
            .iter()
            .filter(|p| p.item_id == item_id && p.captured_at > since)
            .max_by_key(|p| (p.captured_at, p.id))
            .cloned())
    }

    async fn insert_price(
        &self,
        item_id: i64,
        captured_at: DateTime<Utc>,
        currency_code: &str,
        price: Decimal,
    ) -> Result<i64, DbError> {
        let mut prices = self.inner.prices.lock().expect("prices lock");
        let id = i64::try_from(prices.len()).expect("store size") + 1;
        prices.push(PricePointRow {
            id,
            item_id,
            captured_at,
            currency_code: currency_code.to_owned(),
            price,
        });
        Ok(id)
    }
}
