//! Per-field extraction strategies and the priority chain that runs them.
//!
//! Each field is resolved by an ordered list of [`FieldStrategy`] objects,
//! short-circuiting on the first non-empty result. Replaces the nested
//! conditional fallbacks of earlier revisions with a declarative,
//! independently testable list.

use scraper::{ElementRef, Html, Selector};

use crate::lexicon::Lexicon;
use crate::predicates::{find_postal_run, is_address_shaped, is_boilerplate, is_tax_id_shaped, isolate_address};

/// Minimum length (in chars) for an organization-name candidate cell.
const MIN_ORG_NAME_LEN: usize = 20;

/// One attempt at extracting a single field from the document.
pub trait FieldStrategy {
    /// Strategy name recorded in diagnostics.
    fn name(&self) -> &'static str;

    /// Try to produce a value; `None` or empty means "pass to the next one".
    fn try_extract(&self, doc: &Html) -> Option<String>;
}

/// Ordered strategy list for one field; first non-empty result wins.
pub struct FieldChain<'a> {
    strategies: Vec<Box<dyn FieldStrategy + 'a>>,
}

impl<'a> FieldChain<'a> {
    pub fn new(strategies: Vec<Box<dyn FieldStrategy + 'a>>) -> Self {
        Self { strategies }
    }

    /// Resolve the field, returning the value and the winning strategy name
    /// ("none" when every strategy came up empty).
    pub fn resolve(&self, doc: &Html) -> (String, &'static str) {
        for strategy in &self.strategies {
            if let Some(value) = strategy.try_extract(doc) {
                let value = value.trim().to_string();
                if !value.is_empty() {
                    return (value, strategy.name());
                }
            }
        }
        (String::new(), "none")
    }

    /// Resolve with a per-candidate validator: a strategy's candidate that
    /// fails validation falls through to the next strategy instead of
    /// winning with junk. Used for the tax id, where any winner must reduce
    /// to a 9-digit run.
    pub fn resolve_validated(
        &self,
        doc: &Html,
        validate: impl Fn(&str) -> Option<String>,
    ) -> (String, &'static str) {
        for strategy in &self.strategies {
            if let Some(candidate) = strategy.try_extract(doc) {
                if let Some(value) = validate(&candidate) {
                    return (value, strategy.name());
                }
            }
        }
        (String::new(), "none")
    }
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Collect an element's text with whitespace collapsed.
pub(crate) fn cell_text(el: &ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the table row containing `el`, for sibling-cell context checks.
fn row_text(el: &ElementRef) -> String {
    let mut node = el.parent();
    while let Some(n) = node {
        if let Some(parent) = ElementRef::wrap(n) {
            if parent.value().name() == "tr" {
                return cell_text(&parent);
            }
        }
        node = n.parent();
    }
    String::new()
}

/// True if the cell sits inside the lots table (class carries "lot-").
/// Lot cells are known non-identity regions and never organization data.
fn is_lot_cell(el: &ElementRef) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|c| c.contains("lot-"))
}

// ---------------------------------------------------------------------------
// Strategy 1/4: fixed selector (shape-specific or legacy)
// ---------------------------------------------------------------------------

/// Exact expected position from a known template. Used both for the
/// top-priority shape selector and the last-resort legacy selector.
pub struct SelectorStrategy {
    label: &'static str,
    selector: &'static str,
}

impl SelectorStrategy {
    pub fn shape(selector: &'static str) -> Self {
        Self {
            label: "shape-selector",
            selector,
        }
    }

    pub fn legacy(selector: &'static str) -> Self {
        Self {
            label: "legacy-selector",
            selector,
        }
    }
}

impl FieldStrategy for SelectorStrategy {
    fn name(&self) -> &'static str {
        self.label
    }

    fn try_extract(&self, doc: &Html) -> Option<String> {
        let sel = Selector::parse(self.selector).ok()?;
        doc.select(&sel).next().map(|el| cell_text(&el))
    }
}

// ---------------------------------------------------------------------------
// Strategy 2: pattern-matched cell scans
// ---------------------------------------------------------------------------

/// Site-wide scan for a cell whose trimmed text is exactly a 9-digit УНП,
/// excluding the portal's placeholder value and tender reference numbers
/// (identified by sibling-row context).
pub struct TaxIdScan<'a> {
    pub lexicon: &'a Lexicon,
}

impl FieldStrategy for TaxIdScan<'_> {
    fn name(&self) -> &'static str {
        "cell-scan"
    }

    fn try_extract(&self, doc: &Html) -> Option<String> {
        let td = Selector::parse("td").unwrap();
        for el in doc.select(&td) {
            let text = cell_text(&el);
            if !is_tax_id_shaped(&text) {
                continue;
            }
            if self.lexicon.placeholder_tax_ids.contains(&text) {
                continue;
            }
            if Lexicon::matches_any(&row_text(&el), &self.lexicon.reference_context) {
                continue;
            }
            return Some(text);
        }
        None
    }
}

/// Site-wide scan for the longest organization-name-looking cell: long
/// enough, not a tax id, not an address, not boilerplate, not a lot cell.
pub struct OrgNameScan<'a> {
    pub lexicon: &'a Lexicon,
}

impl FieldStrategy for OrgNameScan<'_> {
    fn name(&self) -> &'static str {
        "cell-scan"
    }

    fn try_extract(&self, doc: &Html) -> Option<String> {
        let td = Selector::parse("td").unwrap();
        let mut best: Option<String> = None;

        for el in doc.select(&td) {
            if is_lot_cell(&el) {
                continue;
            }
            let text = cell_text(&el);
            if text.chars().count() < MIN_ORG_NAME_LEN
                || is_tax_id_shaped(&text)
                || is_address_shaped(&text, self.lexicon)
                || is_boilerplate(&text, self.lexicon)
            {
                continue;
            }
            if best.as_ref().is_none_or(|b| text.chars().count() > b.chars().count()) {
                best = Some(text);
            }
        }

        best
    }
}

/// Site-wide scan for an address-shaped cell. A cell that concatenates a
/// quoted organization name with the address is reduced to its address
/// portion.
pub struct AddressScan<'a> {
    pub lexicon: &'a Lexicon,
}

impl FieldStrategy for AddressScan<'_> {
    fn name(&self) -> &'static str {
        "cell-scan"
    }

    fn try_extract(&self, doc: &Html) -> Option<String> {
        let td = Selector::parse("td").unwrap();
        for el in doc.select(&td) {
            let text = cell_text(&el);
            if !is_address_shaped(&text, self.lexicon) {
                continue;
            }

            // Quoted segment ahead of the postal run means the cell mixes
            // in the organization name.
            let mixed = find_postal_run(&text)
                .is_some_and(|pos| text[..pos].contains(['"', '«', '„']));

            return Some(if mixed {
                isolate_address(&text)
            } else {
                text
            });
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Strategy 3: label adjacency
// ---------------------------------------------------------------------------

/// Find a row whose first cell carries a known label substring and return
/// the next cell in the same row.
pub struct LabelAdjacent<'a> {
    pub labels: &'a [String],
}

impl FieldStrategy for LabelAdjacent<'_> {
    fn name(&self) -> &'static str {
        "label-adjacent"
    }

    fn try_extract(&self, doc: &Html) -> Option<String> {
        let tr = Selector::parse("tr").unwrap();
        let cell = Selector::parse("th, td").unwrap();

        for row in doc.select(&tr) {
            let cells: Vec<ElementRef> = row.select(&cell).collect();
            if cells.len() < 2 {
                continue;
            }
            let label = cell_text(&cells[0]);
            if Lexicon::matches_any(&label, self.labels) {
                let value = cell_text(&cells[1]);
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
        None
    }
}
