//! Tolerant listing extraction from search-result markup.
//!
//! CSS selectors mirror the storefront's search-result card structure.
//! Update these when the storefront changes its HTML; the extractor itself
//! never fails, and a card it cannot read is simply omitted from the sequence.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::types::RawListing;

/// Search-result card container.
static RESULT_CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.sg-col-4-of-12").expect("valid card selector"));

/// Product title text inside a card.
static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.a-size-base-plus.a-color-base.a-text-normal")
        .expect("valid title selector")
});

/// Product image inside a card.
static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.s-image").expect("valid image selector"));

/// Listing link inside a card.
static LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a.a-link-normal.a-text-normal").expect("valid link selector")
});

/// Displayed price text inside a card.
static PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.a-price > span.a-offscreen").expect("valid price selector")
});

/// Returns a lazy sequence of listing candidates from a parsed page.
///
/// One candidate per search-result card, each independently extracted. Cards
/// missing a title, image, or link are omitted; a card missing only its
/// price text is passed through with `price_text: None` and rejected
/// downstream at price parsing. Nothing in the sequence panics or errors.
pub fn listings(doc: &Html) -> impl Iterator<Item = RawListing> + '_ {
    doc.select(&RESULT_CARD).filter_map(extract_card)
}

fn extract_card(card: ElementRef<'_>) -> Option<RawListing> {
    let title = card
        .select(&TITLE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());

    let image = card
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_owned);

    let href = card
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_owned);

    let (Some(title), Some(image), Some(href)) = (title, image, href) else {
        tracing::debug!("skipping result card — missing title, image, or link");
        return None;
    };

    let price_text = card
        .select(&PRICE)
        .next()
        .map(element_text)
        .filter(|p| !p.is_empty());

    Some(RawListing {
        title,
        image,
        href,
        price_text,
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}
