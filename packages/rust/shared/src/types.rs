//! Core domain types for procurement-notice extraction.

use serde::{Deserialize, Serialize};

/// Default unit label when a lot cell carries no recognizable unit ("units").
pub const DEFAULT_UNIT: &str = "ед.";

/// Number of digits in a Belarus unified taxpayer number (УНП).
pub const TAX_ID_LEN: usize = 9;

// ---------------------------------------------------------------------------
// LotEntry
// ---------------------------------------------------------------------------

/// One purchasable line item within a procurement notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotEntry {
    /// Free-text lot description as rendered on the notice page.
    pub description: String,
    /// Parsed quantity; 0 when no known text shape matched.
    pub quantity: u32,
    /// Unit label; defaults to [`DEFAULT_UNIT`].
    pub unit: String,
}

impl Default for LotEntry {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: 0,
            unit: DEFAULT_UNIT.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RegistryRecord
// ---------------------------------------------------------------------------

/// Authoritative company record from the tax-registry lookup service.
///
/// Produced only by the registry client and never mutated elsewhere. When
/// present, `short_name` (falling back to `full_name`) supersedes any
/// DOM-derived organization name, and `address` supersedes the DOM address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    /// Unified taxpayer number (9 ASCII digits).
    pub tax_id: String,
    /// Full registered organization name.
    pub full_name: String,
    /// Short organization name, preferred for rendering.
    pub short_name: String,
    /// Registered postal address.
    pub address: String,
    /// Registration date as reported by the registry.
    pub registration_date: String,
    /// Numeric status code.
    pub status_code: String,
    /// Human-readable status name.
    pub status_name: String,
    /// Deregistration date; empty for active organizations.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub removal_date: String,
}

// ---------------------------------------------------------------------------
// ExtractionDiagnostics
// ---------------------------------------------------------------------------

/// Records which strategy resolved each field — for observability, not
/// required for correctness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionDiagnostics {
    /// Name of the detected page shape ("print-area", "marketing", ...).
    pub page_shape: String,
    /// Winning strategy per field ("shape-selector", "cell-scan",
    /// "label-adjacent", "legacy-selector", "none").
    pub field_sources: Vec<FieldSource>,
}

/// The strategy that produced one field's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    /// Field name in the output record.
    pub field: String,
    /// Strategy name, or "none" when every strategy came up empty.
    pub strategy: String,
}

// ---------------------------------------------------------------------------
// ProcurementRecord
// ---------------------------------------------------------------------------

/// The extraction engine's output unit: one normalized record per page visit.
///
/// Absent data is the empty string, never null. Constructed fresh per visit
/// and immutable once handed to the rendering pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcurementRecord {
    /// Customer organization name.
    pub organization_name: String,
    /// Unified taxpayer number; exactly 9 ASCII digits when non-empty.
    pub tax_id: String,
    /// Customer postal address.
    pub address: String,
    /// Delivery place for the procured goods/services.
    pub delivery_place: String,
    /// Payment terms free text.
    pub payment_terms: String,
    /// Proposal submission deadline as rendered on the page.
    pub proposal_end_date: String,
    /// Ordered lot entries; empty only when no lot row could be recovered.
    pub lots: Vec<LotEntry>,
    /// Registry enrichment result; present iff a valid tax id was resolved
    /// and the lookup succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistryRecord>,
    /// Per-field strategy attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<ExtractionDiagnostics>,
}
