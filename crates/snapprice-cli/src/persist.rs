//! Persistence adapter: one raw listing → store mutations.
//!
//! Failures here are isolated per listing: whatever goes wrong, the caller's
//! page loop keeps going. Every exit path is a typed [`PersistOutcome`] so
//! tests can assert which failure kind occurred instead of observing a
//! silently swallowed error.

use chrono::Utc;
use snapprice_db::{CatalogStore, NewItem};
use snapprice_scraper::{parse_price_text, RawListing};

/// Fixed tag identifying the originating storefront on every item row.
pub(crate) const SOURCE_TAG: &str = "amazon";

/// Fixed currency code recorded with every price point.
pub(crate) const CURRENCY_CODE: &str = "zar";

/// What happened to a single listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PersistOutcome {
    /// Item upserted and a new price point recorded.
    Saved,
    /// Item upserted; a price point inside the dedup window already exists,
    /// so no new one was recorded. Not an error.
    SkippedRecentPrice,
    /// The listing carried no parsable price; nothing was written.
    SkippedUnparsablePrice,
    /// A store operation failed; logged and swallowed.
    Failed,
}

/// Persists one extracted listing: upsert the item by its link, then record a
/// price point unless one already exists inside the dedup window.
pub(crate) async fn persist_listing<S: CatalogStore>(
    store: &S,
    base_url: &str,
    brand: &str,
    listing: &RawListing,
    dedup_window: chrono::Duration,
) -> PersistOutcome {
    let Some(price) = listing.price_text.as_deref().and_then(parse_price_text) else {
        tracing::debug!(
            brand = %brand,
            title = %listing.title,
            "skipping listing — missing or unparsable price"
        );
        return PersistOutcome::SkippedUnparsablePrice;
    };

    let item = NewItem {
        link: absolutize(base_url, &listing.href),
        title: listing.title.clone(),
        brand: brand.to_owned(),
        images: vec![listing.image.clone()],
        source: SOURCE_TAG.to_owned(),
    };

    let item_id = match store.upsert_item(&item).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(
                brand = %brand,
                link = %item.link,
                error = %e,
                "item upsert failed; listing skipped"
            );
            return PersistOutcome::Failed;
        }
    };

    let now = Utc::now();
    match store.find_recent_price(item_id, now - dedup_window).await {
        Ok(Some(_)) => {
            tracing::debug!(brand = %brand, item_id, "recent price point exists; skipping insert");
            PersistOutcome::SkippedRecentPrice
        }
        Ok(None) => match store.insert_price(item_id, now, CURRENCY_CODE, price).await {
            Ok(_) => PersistOutcome::Saved,
            Err(e) => {
                tracing::warn!(brand = %brand, item_id, error = %e, "price insert failed");
                PersistOutcome::Failed
            }
        },
        Err(e) => {
            tracing::warn!(brand = %brand, item_id, error = %e, "recent-price lookup failed");
            PersistOutcome::Failed
        }
    }
}

/// Joins a card href onto the storefront base URL. Hrefs on result cards are
/// site-relative; absolute ones (sponsored redirects) pass through untouched.
pub(crate) fn absolutize(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_owned()
    } else if href.starts_with('/') {
        format!("{base_url}{href}")
    } else {
        format!("{base_url}/{href}")
    }
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod tests;
