//! Typed text-shape predicates used by the cell-scan strategies.
//!
//! Everything here is a pure function of the cell text; the DOM walking
//! lives in [`crate::strategies`].

use std::sync::LazyLock;

use regex::Regex;

use offergen_shared::TAX_ID_LEN;

use crate::lexicon::Lexicon;

/// A standalone 9-digit run (not part of a longer digit sequence).
static TAX_ID_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{9})(?:[^0-9]|$)").expect("valid regex"));

/// A standalone 6-digit run — the postal-code shape.
static POSTAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{6})(?:[^0-9]|$)").expect("valid regex"));

/// True if the trimmed text is exactly a 9-digit taxpayer number.
pub fn is_tax_id_shaped(text: &str) -> bool {
    let t = text.trim();
    t.len() == TAX_ID_LEN && t.bytes().all(|b| b.is_ascii_digit())
}

/// Extract the first standalone 9-digit run from free text, if any.
pub fn extract_tax_id(text: &str) -> Option<String> {
    TAX_ID_RUN
        .captures(text)
        .map(|c| c[1].to_string())
}

/// Byte offset of the first standalone 6-digit (postal-code-shaped) run.
pub fn find_postal_run(text: &str) -> Option<usize> {
    POSTAL_RUN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.start())
}

/// True if the text looks like a postal address: a city marker token plus a
/// postal-code-shaped digit run, and no boilerplate phrase.
pub fn is_address_shaped(text: &str, lexicon: &Lexicon) -> bool {
    if is_boilerplate(text, lexicon) {
        return false;
    }
    Lexicon::matches_any(text, &lexicon.city_markers) && find_postal_run(text).is_some()
}

/// True if the text contains any denylisted disclaimer/procedural phrase.
pub fn is_boilerplate(text: &str, lexicon: &Lexicon) -> bool {
    Lexicon::matches_any(text, &lexicon.boilerplate)
}

/// Isolate the address portion of a cell that mixes a quoted organization
/// name with an address: take the remainder from the postal-code run, then
/// discard any trailing quoted segment.
pub fn isolate_address(text: &str) -> String {
    let Some(start) = find_postal_run(text) else {
        return text.trim().to_string();
    };

    let tail = &text[start..];
    let end = tail
        .find(['"', '«', '„'])
        .unwrap_or(tail.len());

    tail[..end].trim().trim_end_matches(',').trim().to_string()
}
