//! Lot quantity/unit normalization.
//!
//! Lot cells on the portal render quantity, unit and sometimes price as one
//! free-text string. Observed shapes, most specific first:
//!
//! - `"<N> (<abbrev>), <price> <currency>"` — number immediately followed by
//!   a parenthesized unit abbreviation;
//! - `"<N> <unit-word>"` — e.g. `"12 месяц(мес)"`;
//! - `"1 условная единица, 2 243.00 BYN"` — a conventional-unit phrase where
//!   the leading 1 is the quantity, not the price figure. This rule is a
//!   best-effort heuristic tuned against observed pages; the keyword list
//!   lives in [`Lexicon`] so it can be adjusted without code changes.
//!
//! A number inside or after a currency-marked segment is never a quantity.

use std::sync::LazyLock;

use regex::Regex;

use offergen_shared::DEFAULT_UNIT;

use crate::lexicon::Lexicon;

/// Leading integer immediately followed by an opening parenthesis.
static PAREN_ADJACENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+)\s*\(").expect("valid regex"));

/// First integer anywhere in the text.
static FIRST_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Leading integer plus surrounding whitespace, for unit-label extraction.
static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9]+\s*").expect("valid regex"));

/// Parse a free-text lot quantity cell into a `(quantity, unit)` pair.
///
/// Returns `(0, "ед.")` when no integer survives currency stripping — a
/// malformed cell is never an error.
pub fn normalize_quantity(text: &str, lexicon: &Lexicon) -> (u32, String) {
    let stripped = strip_currency_tail(text, lexicon);
    let stripped = stripped.trim();

    let quantity = if let Some(caps) = PAREN_ADJACENT.captures(stripped) {
        // Most specific shape: "<N> (<abbrev>)".
        caps[1].parse().unwrap_or(0)
    } else {
        // Recognized unit phrase ("1 условная единица") and the bare
        // fallback coincide once currency segments are gone: the leading
        // number is the quantity.
        if !stripped.is_empty() && !Lexicon::matches_any(stripped, &lexicon.unit_keywords) {
            tracing::debug!(cell = %text, "no unit marker recognized, using first-integer fallback");
        }
        first_integer(stripped)
    };

    (quantity, unit_label(stripped))
}

/// Drop comma-delimited segments from the first one carrying a currency
/// marker onward. Numbers in currency context never contribute a quantity.
fn strip_currency_tail(text: &str, lexicon: &Lexicon) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for segment in text.split(',') {
        if Lexicon::matches_any(segment, &lexicon.currency_markers) {
            break;
        }
        kept.push(segment);
    }
    kept.join(",")
}

/// First integer in the text, or 0.
fn first_integer(text: &str) -> u32 {
    FIRST_INT
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Unit label: strip the leading number, trim separators, default "ед.".
fn unit_label(stripped: &str) -> String {
    let rest = LEADING_INT.replace(stripped, "");
    let rest = rest.trim().trim_matches(',').trim();

    // "(шт.)" reads better as "шт."
    let rest = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(rest);

    if rest.is_empty() {
        DEFAULT_UNIT.to_string()
    } else {
        rest.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> (u32, String) {
        normalize_quantity(text, &Lexicon::default())
    }

    #[test]
    fn plain_number_and_unit_word() {
        let (qty, unit) = normalize("12 месяц(мес)");
        assert_eq!(qty, 12);
        assert_eq!(unit, "месяц(мес)");
    }

    #[test]
    fn unit_with_price_tail() {
        let (qty, unit) = normalize("22 ед., 500.00 BYN");
        assert_eq!(qty, 22);
        assert_eq!(unit, "ед.");
    }

    #[test]
    fn conventional_unit_leading_one() {
        // The price figure must not be mistaken for the quantity.
        let (qty, unit) = normalize("1 условная единица, 2 243.00 BYN");
        assert_eq!(qty, 1);
        assert_eq!(unit, "условная единица");
    }

    #[test]
    fn paren_adjacent_number() {
        let (qty, unit) = normalize("3 (шт.), 1 200.00 BYN");
        assert_eq!(qty, 3);
        assert_eq!(unit, "шт.");
    }

    #[test]
    fn bare_number_defaults_unit() {
        let (qty, unit) = normalize("7");
        assert_eq!(qty, 7);
        assert_eq!(unit, "ед.");
    }

    #[test]
    fn currency_only_cell_yields_zero() {
        // A bare price with no quantity: currency context disqualifies
        // every number in it.
        let (qty, unit) = normalize("2 243.00 BYN");
        assert_eq!(qty, 0);
        assert_eq!(unit, "ед.");
    }

    #[test]
    fn empty_cell() {
        let (qty, unit) = normalize("");
        assert_eq!(qty, 0);
        assert_eq!(unit, "ед.");
    }
}
