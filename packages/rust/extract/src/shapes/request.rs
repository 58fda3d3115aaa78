//! Price-request template (`/request/view/<id>` pages).

use scraper::Html;
use url::Url;

use super::{COMMON_END_DATE, COMMON_PAYMENT, COMMON_PLACE, PageShape, ShapeSelectors};

/// Request pages share the marketing company-block layout, but recent
/// revisions of this template often omit the block entirely, leaving the
/// heuristic scans to recover the customer identity.
pub struct RequestShape;

impl PageShape for RequestShape {
    fn detect(&self, _doc: &Html, url: &Url) -> bool {
        url.path().contains("/request/")
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
        "request"
    }
}
