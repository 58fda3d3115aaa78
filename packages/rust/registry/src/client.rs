//! HTTP client for the state taxpayer registry (portal.nalog.gov.by).
//!
//! The registry is an enrichment source, never a gate: every failure mode
//! (timeout, transport error, HTTP error status, malformed body, unknown
//! УНП) collapses to "no registry data" at the public boundary, and the
//! caller proceeds with DOM-extracted values. Failures are logged at WARN
//! with the failing УНП so operators can spot registry outages.

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use offergen_shared::{OffergenError, RegistryConfig, RegistryRecord, Result, TAX_ID_LEN};

/// Reduce a raw УНП string to its digits; `None` unless exactly nine remain.
///
/// Notice pages occasionally render the number with separators
/// ("100-099-572") or a label prefix; anything that does not reduce to a
/// plausible УНП is rejected before any network traffic happens.
pub fn clean_tax_id(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == TAX_ID_LEN).then_some(digits)
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Response envelope of the `grp/getData` endpoint. An unknown УНП yields
/// an absent or null `row`.
#[derive(Debug, Deserialize)]
struct GrpResponse {
    row: Option<GrpRow>,
}

/// One registry row. Field names follow the portal's wire contract; the
/// status code arrives as a bare number in some responses and as a string
/// in others.
#[derive(Debug, Default, Deserialize)]
struct GrpRow {
    #[serde(default)]
    vunp: Option<serde_json::Value>,
    #[serde(default)]
    vnaimp: String,
    #[serde(default)]
    vnaimk: String,
    #[serde(default)]
    vpadres: String,
    #[serde(default)]
    dreg: String,
    #[serde(default)]
    nsostk: Option<serde_json::Value>,
    #[serde(default)]
    vksostk: String,
    #[serde(default)]
    dlikv: Option<String>,
}

impl GrpRow {
    /// A row without a populated `vunp` is an empty match, not a record.
    fn is_match(&self) -> bool {
        match &self.vunp {
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Number(_)) => true,
            _ => false,
        }
    }

    fn into_record(self, tax_id: String) -> RegistryRecord {
        let status_code = match self.nsostk {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        RegistryRecord {
            tax_id,
            full_name: self.vnaimp,
            short_name: self.vnaimk,
            address: self.vpadres,
            registration_date: self.dreg,
            status_code,
            status_name: self.vksostk,
            removal_date: self.dlikv.unwrap_or_default(),
        }
    }
}

/// Internal lookup outcome, kept three-way for logging; collapsed to
/// `Option` at the public boundary.
enum LookupOutcome {
    Found(RegistryRecord),
    NoMatch,
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for УНП lookups against the taxpayer registry.
pub struct RegistryClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl RegistryClient {
    /// Build a client from configuration. The configured timeout bounds the
    /// whole request (connect plus body), one attempt, no retries.
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            OffergenError::config(format!("invalid registry endpoint {}: {e}", config.endpoint))
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OffergenError::Network(e.to_string()))?;
        Ok(Self { http, endpoint })
    }

    /// Look up a УНП. Returns `None` for invalid input, unknown numbers,
    /// and every form of registry unavailability.
    #[instrument(skip_all, fields(unp = %raw_tax_id))]
    pub async fn lookup(&self, raw_tax_id: &str) -> Option<RegistryRecord> {
        let Some(tax_id) = clean_tax_id(raw_tax_id) else {
            debug!("tax id does not reduce to nine digits, skipping lookup");
            return None;
        };

        match self.fetch(&tax_id).await {
            LookupOutcome::Found(record) => {
                debug!(name = %record.short_name, "registry match");
                Some(record)
            }
            LookupOutcome::NoMatch => {
                debug!("no registry entry");
                None
            }
            LookupOutcome::Unavailable(reason) => {
                warn!(%reason, "registry unavailable, continuing without enrichment");
                None
            }
        }
    }

    async fn fetch(&self, tax_id: &str) -> LookupOutcome {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("unp", tax_id)
            .append_pair("charset", "UTF-8")
            .append_pair("type", "json");

        let response = match self.http.get(url).send().await {
            Ok(r) => r,
            Err(e) => return LookupOutcome::Unavailable(e.to_string()),
        };
        if !response.status().is_success() {
            return LookupOutcome::Unavailable(format!("HTTP {}", response.status()));
        }

        match response.json::<GrpResponse>().await {
            Ok(GrpResponse { row: Some(row) }) if row.is_match() => {
                LookupOutcome::Found(row.into_record(tax_id.to_string()))
            }
            Ok(_) => LookupOutcome::NoMatch,
            Err(e) => LookupOutcome::Unavailable(format!("malformed response: {e}")),
        }
    }
}
