/// A listing candidate extracted from one search-result card.
///
/// Validated once at the extractor boundary: `title`, `image`, and `href`
/// are always present, while `price_text` stays raw. Price parsing is a
/// persistence-time concern, and a card without a visible price is still a
/// well-formed candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub title: String,
    /// Primary product image URL as published on the card.
    pub image: String,
    /// Listing URL as found in the card's anchor, usually relative
    /// (e.g. `/dp/B0ABC123`).
    pub href: String,
    /// Raw displayed price text (e.g. `"R199.99"`), if the card shows one.
    pub price_text: Option<String>,
}
