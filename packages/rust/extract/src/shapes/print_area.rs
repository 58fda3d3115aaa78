//! Print-area template (single-source and auction notices).

use scraper::{Html, Selector};
use url::Url;

use super::{COMMON_END_DATE, COMMON_PAYMENT, COMMON_PLACE, PageShape, ShapeSelectors};

/// Notices rendered inside a `#print-area` region. The company block is the
/// table inside the region's third child div: row 1 holds the name, row 2
/// the address, row 3 the УНП.
pub struct PrintAreaShape;

impl PageShape for PrintAreaShape {
    fn detect(&self, doc: &Html, _url: &Url) -> bool {
        let sel = Selector::parse("#print-area").unwrap();
        doc.select(&sel).next().is_some()
    }

    fn selectors(&self) -> ShapeSelectors {
        ShapeSelectors {
            organization_name: Some(
                "#print-area > div:nth-child(3) > table > tbody > tr:nth-child(1) > td",
            ),
            address: Some(
                "#print-area > div:nth-child(3) > table > tbody > tr:nth-child(2) > td",
            ),
            tax_id: Some(
                "#print-area > div:nth-child(3) > table > tbody > tr:nth-child(3) > td",
            ),
            delivery_place: Some(COMMON_PLACE),
            payment_terms: Some(COMMON_PAYMENT),
            proposal_end_date: Some(COMMON_END_DATE),
        }
    }

    fn name(&self) -> &'static str {
        "print-area"
    }
}
