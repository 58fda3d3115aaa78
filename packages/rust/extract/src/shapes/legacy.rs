//! Legacy (earliest) template — absolute-position fallback.
//!
//! Always matches as the lowest-priority shape. Its selectors double as the
//! last-resort strategy in every field chain, kept for backward
//! compatibility with notices still served through the original markup.

use scraper::Html;
use url::Url;

use super::{COMMON_END_DATE, COMMON_PAYMENT, COMMON_PLACE, PageShape, ShapeSelectors};

/// The earliest template: a value-only company table inside `div.main`,
/// rows name / address / УНП.
pub struct LegacyShape;

impl PageShape for LegacyShape {
    fn detect(&self, _doc: &Html, _url: &Url) -> bool {
        // Legacy shape always matches
        true
    }

    fn selectors(&self) -> ShapeSelectors {
        ShapeSelectors {
            organization_name: Some(
                "div.main > table:nth-of-type(1) > tbody > tr:nth-child(1) > td",
            ),
            address: Some("div.main > table:nth-of-type(1) > tbody > tr:nth-child(2) > td"),
            tax_id: Some("div.main > table:nth-of-type(1) > tbody > tr:nth-child(3) > td"),
            delivery_place: Some(COMMON_PLACE),
            payment_terms: Some(COMMON_PAYMENT),
            proposal_end_date: Some(COMMON_END_DATE),
        }
    }

    fn name(&self) -> &'static str {
        "legacy"
    }
}
