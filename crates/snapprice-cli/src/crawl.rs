//! Brand selection and the per-brand crawl loop.
//!
//! The crawler is one sequential loop: draw a brand at random from the
//! brands already known to the store, walk its search-result pages until a
//! terminal condition, then back off and draw again. Terminal conditions and
//! errors are consumed identically: there is no success path distinct from
//! exhaustion, only the next draw.

use std::time::Duration;

use rand::Rng;
use snapprice_core::AppConfig;
use snapprice_db::{CatalogStore, DbError};
use snapprice_scraper::{
    count_pagination_markers, listings, Html, RawListing, ScraperError, SearchClient,
};

use crate::persist::{persist_listing, PersistOutcome};

/// Terminal condition of one brand crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CrawlEnd {
    /// Page 1 carried no pagination markers: the brand has no results at all.
    BrandNotFound,
    /// Walked every page the storefront advertised.
    PagesExhausted { pages: u32 },
}

/// Errors that terminate a crawl cycle and send control back to the
/// selector's backoff-and-retry.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CrawlError {
    #[error("no brands available to crawl")]
    NoBrands,
    #[error(transparent)]
    Fetch(#[from] ScraperError),
    #[error(transparent)]
    Store(#[from] DbError),
}

pub(crate) struct Crawler<S> {
    store: S,
    client: SearchClient,
    page_delay: Duration,
    retry_delay: Duration,
    dedup_window: chrono::Duration,
}

impl<S: CatalogStore> Crawler<S> {
    pub(crate) fn new(store: S, client: SearchClient, config: &AppConfig) -> Self {
        Self {
            store,
            client,
            page_delay: Duration::from_secs(config.page_delay_secs),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            dedup_window: chrono::Duration::hours(config.price_dedup_hours),
        }
    }

    /// The unattended loop. Never returns; runs under external supervision.
    pub(crate) async fn run(&self) {
        loop {
            match self.cycle().await {
                Ok(end) => tracing::info!(end = ?end, "brand crawl finished"),
                Err(e) => tracing::warn!(error = %e, "crawl cycle failed"),
            }
            tokio::time::sleep(self.retry_delay).await;
        }
    }

    /// One brand-selection cycle: draw a brand, crawl it to a terminal
    /// condition. An empty brand set is a failure like any other; the
    /// caller backs off and retries.
    pub(crate) async fn cycle(&self) -> Result<CrawlEnd, CrawlError> {
        let brands = self.store.distinct_brands().await?;
        let brand = pick_brand(&brands).ok_or(CrawlError::NoBrands)?;
        tracing::info!(brand = %brand, total_brands = brands.len(), "brand selected");
        self.crawl_brand(brand, 1).await
    }

    /// Walks search-result pages for one brand until a terminal condition.
    ///
    /// The page cursor is owned by this invocation; a fresh invocation always
    /// starts back at page 1, so there is no cross-crawl cursor state.
    pub(crate) async fn crawl_brand(
        &self,
        brand: &str,
        start_page: u32,
    ) -> Result<CrawlEnd, CrawlError> {
        let mut page = start_page;

        loop {
            let html = self.client.fetch_search_page(brand, page).await?;

            // Html is not Send: parse and drain the lazy listing sequence
            // before the first await below.
            let (total_pages, cards) = {
                let doc = Html::parse_document(&html);
                let total_pages = count_pagination_markers(&doc);
                let cards: Vec<RawListing> = if total_pages == 0 {
                    Vec::new()
                } else {
                    listings(&doc).collect()
                };
                (total_pages, cards)
            };

            if total_pages == 0 {
                tracing::info!(brand = %brand, page, "no pagination markers; brand not on storefront");
                return Ok(CrawlEnd::BrandNotFound);
            }

            let mut saved = 0usize;
            let mut skipped = 0usize;
            for card in &cards {
                match persist_listing(
                    &self.store,
                    self.client.base_url(),
                    brand,
                    card,
                    self.dedup_window,
                )
                .await
                {
                    PersistOutcome::Saved => saved += 1,
                    PersistOutcome::SkippedRecentPrice
                    | PersistOutcome::SkippedUnparsablePrice
                    | PersistOutcome::Failed => skipped += 1,
                }
            }
            tracing::info!(brand = %brand, page, total_pages, saved, skipped, "page processed");

            if page >= total_pages {
                return Ok(CrawlEnd::PagesExhausted { pages: total_pages });
            }
            page += 1;
            tokio::time::sleep(self.page_delay).await;
        }
    }
}

/// Draws one brand uniformly at random; `None` for an empty set.
///
/// The draw is a uniform integer index so every brand, including the last,
/// carries the same probability mass.
fn pick_brand(brands: &[String]) -> Option<&str> {
    if brands.is_empty() {
        return None;
    }
    let idx = rand::rng().random_range(0..brands.len());
    Some(brands[idx].as_str())
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
