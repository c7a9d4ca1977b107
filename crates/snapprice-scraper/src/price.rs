//! Price-text parsing.

use rust_decimal::Decimal;

/// Parses a displayed price like `"R199.99"` into a decimal value.
///
/// The text is split on the `R` currency symbol and the remainder parsed
/// after stripping thousands separators. Returns `None` (never zero) for
/// missing symbols, unparsable remainders, or negative values, so a listing
/// with a broken price is skipped rather than recorded at R0.
#[must_use]
pub fn parse_price_text(raw: &str) -> Option<Decimal> {
    let (_, numeric) = raw.split_once('R')?;
    let cleaned = numeric.trim().replace([',', '\u{a0}', ' '], "");
    if cleaned.is_empty() {
        return None;
    }

    let value = cleaned.parse::<Decimal>().ok()?;
    if value.is_sign_negative() {
        return None;
    }
    Some(value)
}
