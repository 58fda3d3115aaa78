//! Keyword and phrase sets driving the text heuristics.
//!
//! Lifted out of the scanning code so the sets can be tested in isolation
//! and tuned (or localized) without touching the strategies themselves.

/// Disclaimer/procedural phrases that disqualify a cell from being treated
/// as organizational data, however long or address-shaped it looks.
const BOILERPLATE_PHRASES: &[&str] = &[
    "настоящее приглашение не является",
    "в соответствии с постановлением",
    "в соответствии с законом",
    "участник, подавший предложение",
    "порядок проведения процедуры",
    "совет министров республики беларусь",
    "документы, подтверждающие",
    "не допускается к участию",
];

/// Labels whose row-neighbor holds the organization name.
const ORG_LABELS: &[&str] = &["организ"];

/// Labels whose row-neighbor holds the postal address.
const ADDRESS_LABELS: &[&str] = &["адрес"];

/// Labels whose row-neighbor holds the unified taxpayer number.
const TAX_ID_LABELS: &[&str] = &["унп", "уникальный номер"];

/// Labels whose row-neighbor holds the delivery place.
const PLACE_LABELS: &[&str] = &["место"];

/// Labels whose row-neighbor holds the payment terms.
const PAYMENT_LABELS: &[&str] = &["платеж", "оплат"];

/// Labels whose row-neighbor holds the proposal end date.
const END_DATE_LABELS: &[&str] = &["окончан"];

/// Tokens marking a settlement in an address cell.
const CITY_MARKERS: &[&str] = &["г.", "г\u{a0}.", "аг.", "д.", "гп.", "минск", "обл."];

/// Row-context phrases marking a 9-digit cell as a tender reference number,
/// not a taxpayer number. Multi-word on purpose: the УНП label itself
/// contains the word "номер".
const REFERENCE_CONTEXT: &[&str] = &[
    "номер закупки",
    "номер процедуры",
    "регистрационный номер",
    "лот №",
];

/// Unit-of-measure phrases recognized in lot quantity cells.
const UNIT_KEYWORDS: &[&str] = &[
    "условная единица",
    "усл. ед",
    "единица",
    "ед.",
    "ед",
    "шт",
    "месяц",
    "мес",
    "час",
    "день",
    "км",
    "кг",
    "литр",
    "комплект",
    "услуга",
];

/// Currency markers; any number inside or after a segment carrying one of
/// these is never a quantity.
const CURRENCY_MARKERS: &[&str] = &["byn", "бел. руб", "руб", "usd", "eur"];

/// The portal's empty-УНП filler value.
const PLACEHOLDER_TAX_IDS: &[&str] = &["000000000"];

/// All keyword/phrase sets used by the extraction heuristics.
///
/// [`Lexicon::default`] carries the built-in sets tuned against the portal's
/// observed page templates; callers may substitute their own.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub boilerplate: Vec<String>,
    pub org_labels: Vec<String>,
    pub address_labels: Vec<String>,
    pub tax_id_labels: Vec<String>,
    pub place_labels: Vec<String>,
    pub payment_labels: Vec<String>,
    pub end_date_labels: Vec<String>,
    pub city_markers: Vec<String>,
    pub reference_context: Vec<String>,
    pub unit_keywords: Vec<String>,
    pub currency_markers: Vec<String>,
    pub placeholder_tax_ids: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let owned = |set: &[&str]| set.iter().map(|s| s.to_string()).collect();
        Self {
            boilerplate: owned(BOILERPLATE_PHRASES),
            org_labels: owned(ORG_LABELS),
            address_labels: owned(ADDRESS_LABELS),
            tax_id_labels: owned(TAX_ID_LABELS),
            place_labels: owned(PLACE_LABELS),
            payment_labels: owned(PAYMENT_LABELS),
            end_date_labels: owned(END_DATE_LABELS),
            city_markers: owned(CITY_MARKERS),
            reference_context: owned(REFERENCE_CONTEXT),
            unit_keywords: owned(UNIT_KEYWORDS),
            currency_markers: owned(CURRENCY_MARKERS),
            placeholder_tax_ids: owned(PLACEHOLDER_TAX_IDS),
        }
    }
}

impl Lexicon {
    /// True if `text` (lowercased) contains any phrase from `set`.
    pub(crate) fn matches_any(text: &str, set: &[String]) -> bool {
        let lower = text.to_lowercase();
        set.iter().any(|phrase| lower.contains(phrase.as_str()))
    }
}
