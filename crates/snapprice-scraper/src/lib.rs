pub mod client;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod price;
mod rate_limit;
pub mod types;

pub use client::SearchClient;
pub use error::ScraperError;
pub use extract::listings;
pub use pagination::count_pagination_markers;
pub use price::parse_price_text;
pub use types::RawListing;

// Callers parse once and feed the same document to `count_pagination_markers`
// and `listings`.
pub use scraper::Html;
