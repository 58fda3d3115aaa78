//! The field-extraction engine.
//!
//! Given a loaded document and its source URL, produces a normalized
//! [`NoticeRecord`] using a prioritized chain of strategies per field,
//! independent of which template rendered the content:
//!
//! 1. shape-specific table selector (exact expected position);
//! 2. pattern-matched cell scan (field-specific text signatures);
//! 3. label-adjacency scan (label cell → next cell in the row);
//! 4. legacy absolute-position fallback.
//!
//! The engine mutates nothing in the supplied document and holds no state
//! across invocations; it fails only when the document has no parseable
//! body, never on missing individual fields.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use offergen_shared::{ExtractionDiagnostics, FieldSource, OffergenError, Result};

use crate::lexicon::Lexicon;
use crate::predicates::extract_tax_id;
use crate::shapes::{
    LOT_COUNT_CELL, LOT_DESCRIPTION_CELL, LOT_ROWS, LegacyShape, PageShape, ShapeRegistry,
    ShapeSelectors,
};
use crate::strategies::{
    AddressScan, FieldChain, FieldStrategy, LabelAdjacent, OrgNameScan, SelectorStrategy,
    TaxIdScan, cell_text,
};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A lot row as recovered from the page, before quantity normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLot {
    /// Free-text lot description.
    pub description: String,
    /// Raw quantity/unit/price cell text, fed to the quantity normalizer.
    pub count_text: String,
}

/// Raw DOM extraction result: one record per page visit, every field an
/// empty string when its strategy chain came up empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeRecord {
    pub organization_name: String,
    pub tax_id: String,
    pub address: String,
    pub delivery_place: String,
    pub payment_terms: String,
    pub proposal_end_date: String,
    /// Lot rows in document order (1 or 2 observed in practice).
    pub lots: Vec<RawLot>,
    /// Which strategy resolved each field.
    pub diagnostics: ExtractionDiagnostics,
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Page-shape-aware field extractor.
pub struct Extractor {
    lexicon: Lexicon,
    registry: ShapeRegistry,
}

impl Extractor {
    /// Create an extractor with the built-in lexicon and shapes.
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::default())
    }

    /// Create an extractor with a caller-supplied lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            registry: ShapeRegistry::new(),
        }
    }

    /// Extract a raw notice record from a parsed document.
    ///
    /// Fails only on total structural absence of a parseable body; a field
    /// whose strategy chain is exhausted is left empty.
    #[instrument(skip_all, fields(url = %url))]
    pub fn extract(&self, doc: &Html, url: &Url) -> Result<NoticeRecord> {
        ensure_parseable_body(doc)?;

        let shape = self.registry.detect(doc, url);
        debug!(shape = shape.name(), "page shape detected");

        let selectors = shape.selectors();
        let legacy = LegacyShape.selectors();
        // When the legacy shape itself matched, the shape slot would
        // duplicate the last-resort slot; leave priority 1 empty instead.
        let shaped = if shape.name() == LegacyShape.name() {
            ShapeSelectors::default()
        } else {
            selectors
        };

        let mut sources: Vec<FieldSource> = Vec::new();
        let mut resolve = |field: &str, chain: FieldChain| {
            let (value, strategy) = chain.resolve(doc);
            sources.push(FieldSource {
                field: field.into(),
                strategy: strategy.into(),
            });
            value
        };

        let organization_name = resolve(
            "organization_name",
            self.chain(
                shaped.organization_name,
                Some(Box::new(OrgNameScan {
                    lexicon: &self.lexicon,
                })),
                &self.lexicon.org_labels,
                legacy.organization_name,
            ),
        );

        let address = resolve(
            "address",
            self.chain(
                shaped.address,
                Some(Box::new(AddressScan {
                    lexicon: &self.lexicon,
                })),
                &self.lexicon.address_labels,
                legacy.address,
            ),
        );

        let delivery_place = resolve(
            "delivery_place",
            self.chain(
                shaped.delivery_place,
                None,
                &self.lexicon.place_labels,
                legacy.delivery_place,
            ),
        );

        let payment_terms = resolve(
            "payment_terms",
            self.chain(
                shaped.payment_terms,
                None,
                &self.lexicon.payment_labels,
                legacy.payment_terms,
            ),
        );

        let proposal_end_date = resolve(
            "proposal_end_date",
            self.chain(
                shaped.proposal_end_date,
                None,
                &self.lexicon.end_date_labels,
                legacy.proposal_end_date,
            ),
        );

        // Tax id candidates must reduce to a standalone 9-digit run; a
        // strategy that wins with junk would mask a valid lower-priority
        // candidate.
        let tax_chain = self.chain(
            shaped.tax_id,
            Some(Box::new(TaxIdScan {
                lexicon: &self.lexicon,
            })),
            &self.lexicon.tax_id_labels,
            legacy.tax_id,
        );
        let (tax_id, tax_strategy) = tax_chain.resolve_validated(doc, |candidate| {
            extract_tax_id(candidate)
                .filter(|id| !self.lexicon.placeholder_tax_ids.contains(id))
        });
        sources.push(FieldSource {
            field: "tax_id".into(),
            strategy: tax_strategy.into(),
        });

        let (lots, lots_strategy) = self.extract_lots(doc);
        sources.push(FieldSource {
            field: "lots".into(),
            strategy: lots_strategy.into(),
        });

        debug!(
            org_found = !organization_name.is_empty(),
            tax_id_found = !tax_id.is_empty(),
            address_found = !address.is_empty(),
            lot_count = lots.len(),
            "extraction complete"
        );

        Ok(NoticeRecord {
            organization_name,
            tax_id,
            address,
            delivery_place,
            payment_terms,
            proposal_end_date,
            lots,
            diagnostics: ExtractionDiagnostics {
                page_shape: shape.name().into(),
                field_sources: sources,
            },
        })
    }

    /// Assemble one field's chain in strict priority order.
    fn chain<'a>(
        &'a self,
        shape_selector: Option<&'static str>,
        scan: Option<Box<dyn FieldStrategy + 'a>>,
        labels: &'a [String],
        legacy_selector: Option<&'static str>,
    ) -> FieldChain<'a> {
        let mut strategies: Vec<Box<dyn FieldStrategy + 'a>> = Vec::new();
        if let Some(sel) = shape_selector {
            strategies.push(Box::new(SelectorStrategy::shape(sel)));
        }
        if let Some(scan) = scan {
            strategies.push(scan);
        }
        strategies.push(Box::new(LabelAdjacent { labels }));
        if let Some(sel) = legacy_selector {
            strategies.push(Box::new(SelectorStrategy::legacy(sel)));
        }
        FieldChain::new(strategies)
    }

    /// Recover lot rows: the `#lotsList` table first, then a site-wide scan
    /// for rows shaped like (index, description, count).
    fn extract_lots(&self, doc: &Html) -> (Vec<RawLot>, &'static str) {
        let row_sel = Selector::parse(LOT_ROWS).unwrap();
        let desc_sel = Selector::parse(LOT_DESCRIPTION_CELL).unwrap();
        let count_sel = Selector::parse(LOT_COUNT_CELL).unwrap();

        let mut lots: Vec<RawLot> = Vec::new();
        for row in doc.select(&row_sel) {
            let description = row
                .select(&desc_sel)
                .next()
                .map(|el| cell_text(&el))
                .unwrap_or_default();
            let count_text = row
                .select(&count_sel)
                .next()
                .map(|el| cell_text(&el))
                .unwrap_or_default();
            if !description.is_empty() || !count_text.is_empty() {
                lots.push(RawLot {
                    description,
                    count_text,
                });
            }
        }
        if !lots.is_empty() {
            return (lots, "lot-table");
        }

        let scanned = self.scan_lot_rows(doc);
        if scanned.is_empty() {
            (scanned, "none")
        } else {
            (scanned, "table-scan")
        }
    }

    /// Fallback lot recovery: any table row whose first cell is a bare
    /// index number and whose second cell reads like a description.
    fn scan_lot_rows(&self, doc: &Html) -> Vec<RawLot> {
        let table_sel = Selector::parse("table").unwrap();
        let tr_sel = Selector::parse("tr").unwrap();
        let td_sel = Selector::parse("td").unwrap();

        let mut lots = Vec::new();
        for table in doc.select(&table_sel) {
            for row in table.select(&tr_sel) {
                let cells: Vec<ElementRef> = row.select(&td_sel).collect();
                if cells.len() < 3 {
                    continue;
                }
                let index = cell_text(&cells[0]);
                let description = cell_text(&cells[1]);
                if index.bytes().all(|b| b.is_ascii_digit())
                    && !index.is_empty()
                    && description.chars().count() > 10
                {
                    lots.push(RawLot {
                        description,
                        count_text: cell_text(&cells[2]),
                    });
                }
            }
        }
        lots
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject documents with no parseable body at all.
fn ensure_parseable_body(doc: &Html) -> Result<()> {
    let body_sel = Selector::parse("body").unwrap();
    let has_content = doc
        .select(&body_sel)
        .next()
        .is_some_and(|body| body.children().next().is_some());

    if has_content {
        Ok(())
    } else {
        Err(OffergenError::parse(
            "document has no parseable body".to_string(),
        ))
    }
}
