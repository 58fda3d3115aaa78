//! Page-shape trait and the built-in shapes for the portal's templates.
//!
//! The portal has rendered logically identical procurement notices through
//! at least four distinct DOM templates over time. Each shape knows how to
//! recognize its template (by URL path segment and/or anchor elements) and
//! carries the exact selectors for the company block in that template.
//! Shapes are tried in priority order; [`LegacyShape`] is the always-last
//! fallback.

mod legacy;
mod marketing;
mod print_area;
mod request;

use scraper::Html;
use url::Url;

pub use legacy::LegacyShape;
pub use marketing::MarketingShape;
pub use print_area::PrintAreaShape;
pub use request::RequestShape;

/// Lot-detail list selectors shared by every template since the lot table
/// was introduced: the `#lot-inf-1` row carries end date / place / payment
/// as list items.
pub(crate) const COMMON_END_DATE: &str =
    "#lot-inf-1 > td:nth-child(3) > ul:nth-child(1) > li:nth-child(1) > span";
pub(crate) const COMMON_PLACE: &str =
    "#lot-inf-1 > td:nth-child(3) > ul:nth-child(1) > li:nth-child(2) > span";
pub(crate) const COMMON_PAYMENT: &str =
    "#lot-inf-1 > td:nth-child(3) > ul:nth-child(1) > li:nth-child(4) > span";

/// Lot row selectors for the `#lotsList` table.
pub(crate) const LOT_ROWS: &str = "#lotsList > tbody > tr.lot-row";
pub(crate) const LOT_DESCRIPTION_CELL: &str = "td.lot-description";
pub(crate) const LOT_COUNT_CELL: &str = "td.lot-count-price";

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Exact expected positions of the company-block fields in one template.
/// `None` means the template exposes no fixed position for that field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeSelectors {
    pub organization_name: Option<&'static str>,
    pub address: Option<&'static str>,
    pub tax_id: Option<&'static str>,
    pub delivery_place: Option<&'static str>,
    pub payment_terms: Option<&'static str>,
    pub proposal_end_date: Option<&'static str>,
}

/// Trait for template-specific field positions.
pub trait PageShape: Send + Sync {
    /// Try to detect this template in the parsed HTML / source URL.
    fn detect(&self, doc: &Html, url: &Url) -> bool;

    /// Fixed selectors for this template's company block.
    fn selectors(&self) -> ShapeSelectors;

    /// Human-readable shape name for diagnostics and tracing.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds registered shapes in priority order.
pub struct ShapeRegistry {
    shapes: Vec<Box<dyn PageShape>>,
}

impl ShapeRegistry {
    /// Create a registry with all built-in shapes (template-specific first,
    /// legacy last).
    pub fn new() -> Self {
        Self {
            shapes: vec![
                Box::new(PrintAreaShape),
                Box::new(MarketingShape),
                Box::new(RequestShape),
                Box::new(LegacyShape),
            ],
        }
    }

    /// Detect the best shape for the given document.
    /// Always returns a shape (LegacyShape is the fallback).
    pub fn detect(&self, doc: &Html, url: &Url) -> &dyn PageShape {
        for shape in &self.shapes {
            if shape.detect(doc, url) {
                return shape.as_ref();
            }
        }
        // Unreachable: LegacyShape always matches
        unreachable!("LegacyShape must always match");
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
