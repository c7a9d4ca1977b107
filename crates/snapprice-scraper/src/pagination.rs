//! Pagination detection for search-result pages.
//!
//! The storefront exposes no page-count endpoint; the only signal is the row
//! of pagination controls rendered at the bottom of each result page. Every
//! control (numbered page, ellipsis, next/previous) carries the
//! `s-pagination-item` class, so the number of markers on page 1 bounds the
//! crawl. A page with zero markers means the brand produced no results at
//! all: "brand not found", not "single page".

use std::sync::LazyLock;

use scraper::{Html, Selector};

static PAGINATION_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".s-pagination-item").expect("valid pagination selector"));

/// Counts the pagination markers present in a parsed search-result page.
#[must_use]
pub fn count_pagination_markers(doc: &Html) -> u32 {
    u32::try_from(doc.select(&PAGINATION_ITEM).count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_markers_on_page_without_pagination() {
        let doc = Html::parse_document("<html><body><p>no results</p></body></html>");
        assert_eq!(count_pagination_markers(&doc), 0);
    }

    #[test]
    fn counts_every_marker_regardless_of_element_type() {
        let html = r#"
            <div>
              <span class="s-pagination-item s-pagination-disabled">Previous</span>
              <a class="s-pagination-item">1</a>
              <a class="s-pagination-item">2</a>
              <a class="s-pagination-item s-pagination-next">Next</a>
            </div>
        "#;
        let doc = Html::parse_document(html);
        assert_eq!(count_pagination_markers(&doc), 4);
    }

    #[test]
    fn ignores_unrelated_classes() {
        let html = r#"<div><span class="s-pagination">3</span><a class="pagination-item">4</a></div>"#;
        let doc = Html::parse_document(html);
        assert_eq!(count_pagination_markers(&doc), 0);
    }
}
