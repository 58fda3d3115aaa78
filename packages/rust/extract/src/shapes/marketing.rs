//! Marketing-research template (`/marketing/view/<id>` pages).

use scraper::Html;
use url::Url;

use super::{COMMON_END_DATE, COMMON_PAYMENT, COMMON_PLACE, PageShape, ShapeSelectors};

/// Marketing pages drop the print region; the company block is the table in
/// the fourth child div of the page container, with the address and УНП rows
/// swapped relative to the print-area template (name / address / УНП).
pub struct MarketingShape;

impl PageShape for MarketingShape {
    fn detect(&self, _doc: &Html, url: &Url) -> bool {
        url.path().contains("/marketing/")
    }

    fn selectors(&self) -> ShapeSelectors {
        ShapeSelectors {
            organization_name: Some(
                "body > div > div > div:nth-child(4) > table > tbody > tr:nth-child(1) > td",
            ),
            address: Some(
                "body > div > div > div:nth-child(4) > table > tbody > tr:nth-child(2) > td",
            ),
            tax_id: Some(
                "body > div > div > div:nth-child(4) > table > tbody > tr:nth-child(3) > td",
            ),
            delivery_place: Some(COMMON_PLACE),
            payment_terms: Some(COMMON_PAYMENT),
            proposal_end_date: Some(COMMON_END_DATE),
        }
    }

    fn name(&self) -> &'static str {
        "marketing"
    }
}
