//! End-to-end notice processing: fetch, extract, enrich, assemble.
//!
//! A registry failure never fails the pipeline; only an unreachable page or
//! an error page does. The most recent result is kept in a single-slot
//! cache keyed by URL, so re-rendering the same notice skips the network
//! entirely.

use std::time::Duration;

use scraper::{Html, Selector};
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use url::Url;

use offergen_extract::{Extractor, Lexicon};
use offergen_registry::RegistryClient;
use offergen_shared::{AppConfig, OffergenError, ProcurementRecord, Result};

use crate::assembler::assemble;

/// Phrases marking a rendered error page. Checked against the page title
/// and headings, lowercased.
const ERROR_PAGE_MARKERS: &[&str] = &["ошибка", "страница не найдена", "page not found"];

/// The full extraction pipeline. One instance per process; holds the HTTP
/// client, the extractor, the registry client, and the result cache.
pub struct Pipeline {
    http: reqwest::Client,
    extractor: Extractor,
    registry: RegistryClient,
    lexicon: Lexicon,
    // Single slot, overwritten wholesale on every new URL.
    cache: Mutex<Option<(String, ProcurementRecord)>>,
}

impl Pipeline {
    /// Build a pipeline from configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.fetch.user_agent)
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| OffergenError::Network(e.to_string()))?;

        Ok(Self {
            http,
            extractor: Extractor::new(),
            registry: RegistryClient::new(&config.registry)?,
            lexicon: Lexicon::default(),
            cache: Mutex::new(None),
        })
    }

    /// Fetch a notice page and produce its assembled record.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn process_url(&self, url: &Url) -> Result<ProcurementRecord> {
        if let Some(record) = self.cached(url).await {
            debug!("serving cached record");
            return Ok(record);
        }

        let html = self.fetch(url).await?;
        let record = self.process_html(&html, url).await?;

        *self.cache.lock().await = Some((url.to_string(), record.clone()));
        Ok(record)
    }

    /// Process already-loaded HTML (local files, tests) for the given URL.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn process_html(&self, html: &str, url: &Url) -> Result<ProcurementRecord> {
        // The parsed DOM is not Send; keep it scoped out of the await below.
        let notice = {
            let doc = Html::parse_document(html);
            if let Some(marker) = error_page_marker(&doc) {
                return Err(OffergenError::page_unavailable(
                    url.as_str(),
                    format!("error page: {marker}"),
                ));
            }
            self.extractor.extract(&doc, url)?
        };

        let registry = if notice.tax_id.is_empty() {
            debug!("no tax id extracted, skipping registry lookup");
            None
        } else {
            self.registry.lookup(&notice.tax_id).await
        };

        Ok(assemble(notice, registry, &self.lexicon))
    }

    async fn cached(&self, url: &Url) -> Option<ProcurementRecord> {
        let guard = self.cache.lock().await;
        guard
            .as_ref()
            .filter(|(cached_url, _)| cached_url == url.as_str())
            .map(|(_, record)| record.clone())
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| OffergenError::page_unavailable(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OffergenError::page_unavailable(
                url.as_str(),
                format!("HTTP {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| OffergenError::Network(e.to_string()))
    }
}

/// Returns the matching marker when the document is a rendered error page.
fn error_page_marker(doc: &Html) -> Option<&'static str> {
    let sel = Selector::parse("title, h1").unwrap();
    for el in doc.select(&sel) {
        let text = el.text().collect::<String>().to_lowercase();
        for marker in ERROR_PAGE_MARKERS {
            if text.contains(*marker) {
                return Some(marker);
            }
        }
    }
    None
}
