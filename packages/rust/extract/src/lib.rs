//! Field extraction for goszakupki.by procurement notices.
//!
//! This crate provides:
//! - [`shapes`] — Template-specific page shapes and their fixed selectors
//! - [`ShapeRegistry`] — Detects the best shape for a given HTML document
//! - [`Extractor`] — Shape-aware, strategy-chained field extraction
//! - [`quantity`] — Lot quantity/unit normalization

pub mod engine;
pub mod lexicon;
pub mod predicates;
pub mod quantity;
pub mod shapes;
pub mod strategies;

pub use engine::{Extractor, NoticeRecord, RawLot};
pub use lexicon::Lexicon;
pub use quantity::normalize_quantity;
pub use shapes::{
    LegacyShape, MarketingShape, PageShape, PrintAreaShape, RequestShape, ShapeRegistry,
    ShapeSelectors,
};
pub use strategies::{FieldChain, FieldStrategy};

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;
    use url::Url;

    fn load_fixture(name: &str) -> Html {
        let path = format!("../../../fixtures/html/{name}");
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {path}"));
        Html::parse_document(&content)
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn source<'a>(record: &'a NoticeRecord, field: &str) -> &'a str {
        record
            .diagnostics
            .field_sources
            .iter()
            .find(|s| s.field == field)
            .map(|s| s.strategy.as_str())
            .unwrap_or_else(|| panic!("no diagnostic entry for field: {field}"))
    }

    // -----------------------------------------------------------------------
    // Shape detection tests
    // -----------------------------------------------------------------------

    #[test]
    fn detect_print_area() {
        let doc = load_fixture("print_area.html");
        let registry = ShapeRegistry::new();
        let shape = registry.detect(&doc, &url("https://goszakupki.by/tender/view/486132"));
        assert_eq!(shape.name(), "print-area");
    }

    #[test]
    fn detect_marketing() {
        let doc = load_fixture("marketing.html");
        let registry = ShapeRegistry::new();
        let shape = registry.detect(&doc, &url("https://goszakupki.by/marketing/view/302875401"));
        assert_eq!(shape.name(), "marketing");
    }

    #[test]
    fn detect_request() {
        let doc = load_fixture("request.html");
        let registry = ShapeRegistry::new();
        let shape = registry.detect(&doc, &url("https://goszakupki.by/request/view/118204"));
        assert_eq!(shape.name(), "request");
    }

    #[test]
    fn detect_legacy_fallback() {
        let doc = load_fixture("legacy.html");
        let registry = ShapeRegistry::new();
        let shape = registry.detect(&doc, &url("https://goszakupki.by/view/90311"));
        assert_eq!(shape.name(), "legacy");
    }

    // -----------------------------------------------------------------------
    // Full extraction tests
    // -----------------------------------------------------------------------

    #[test]
    fn print_area_extracts_via_shape_selectors() {
        let doc = load_fixture("print_area.html");
        let record = Extractor::new()
            .extract(&doc, &url("https://goszakupki.by/tender/view/486132"))
            .unwrap();

        assert_eq!(
            record.organization_name,
            "Открытое акционерное общество \"Гомельский завод литья и нормалей\""
        );
        assert_eq!(
            record.address,
            "247045, Гомельская обл., г. Гомель, ул. Могилёвская, 16"
        );
        assert_eq!(record.tax_id, "400069035");
        assert_eq!(record.proposal_end_date, "27.08.2026 11:00");
        assert_eq!(
            record.delivery_place,
            "г. Гомель, ул. Могилёвская, 16, склад № 2"
        );
        assert_eq!(record.payment_terms, "отсрочка платежа 30 календарных дней");

        assert_eq!(record.diagnostics.page_shape, "print-area");
        assert_eq!(source(&record, "organization_name"), "shape-selector");
        assert_eq!(source(&record, "tax_id"), "shape-selector");
        assert_eq!(source(&record, "lots"), "lot-table");

        assert_eq!(record.lots.len(), 1);
        assert_eq!(
            record.lots[0].description,
            "Столы письменные для учебных классов, регулируемые по высоте"
        );
        assert_eq!(record.lots[0].count_text, "3 (шт.), 1 200.00 BYN");
    }

    #[test]
    fn marketing_extracts_company_block_and_both_lots() {
        let doc = load_fixture("marketing.html");
        let record = Extractor::new()
            .extract(&doc, &url("https://goszakupki.by/marketing/view/302875401"))
            .unwrap();

        assert_eq!(
            record.organization_name,
            "Коммунальное унитарное предприятие \"Минскводоканал\""
        );
        assert_eq!(record.address, "220088, г. Минск, ул. Пулихова, 15");
        assert_eq!(record.tax_id, "100185245");
        assert_eq!(record.proposal_end_date, "20.08.2026 10:00");
        assert_eq!(record.payment_terms, "по факту поставки, отсрочка 45 дней");

        assert_eq!(record.diagnostics.page_shape, "marketing");
        assert_eq!(source(&record, "organization_name"), "shape-selector");

        assert_eq!(record.lots.len(), 2);
        assert_eq!(record.lots[0].count_text, "12 месяц(мес), 14 400.00 BYN");
        assert_eq!(
            record.lots[1].description,
            "Услуги по лабораторному контролю качества питьевой воды"
        );
        assert_eq!(record.lots[1].count_text, "1 условная единица, 2 243.00 BYN");
    }

    #[test]
    fn request_recovers_fields_without_company_block() {
        let doc = load_fixture("request.html");
        let record = Extractor::new()
            .extract(&doc, &url("https://goszakupki.by/request/view/118204"))
            .unwrap();

        assert_eq!(record.diagnostics.page_shape, "request");

        // No company block at the expected position: the heuristic scans
        // must carry every identity field.
        assert_eq!(
            record.organization_name,
            "Государственное предприятие \"Столичный транспорт и связь\""
        );
        assert_eq!(source(&record, "organization_name"), "cell-scan");

        // Mixed name+address cell is reduced to its address portion.
        assert_eq!(record.address, "220113, г. Минск, ул. Мележа, 1, оф. 404");
        assert_eq!(source(&record, "address"), "cell-scan");

        // 302875401 sits next to a "Номер закупки" label and must lose to
        // the real УНП further down.
        assert_eq!(record.tax_id, "193456789");
        assert_eq!(source(&record, "tax_id"), "cell-scan");

        assert_eq!(record.delivery_place, "г. Минск, ул. Аранская, 17");
        assert_eq!(source(&record, "delivery_place"), "label-adjacent");
        assert_eq!(record.payment_terms, "по факту поставки, отсрочка 30 дней");
        assert_eq!(record.proposal_end_date, "28.08.2026 10:00");

        assert_eq!(record.lots.len(), 1);
        assert_eq!(record.lots[0].count_text, "22 ед., 500.00 BYN");
    }

    #[test]
    fn legacy_falls_back_to_absolute_selectors() {
        let doc = load_fixture("legacy.html");
        let record = Extractor::new()
            .extract(&doc, &url("https://goszakupki.by/view/90311"))
            .unwrap();

        assert_eq!(record.diagnostics.page_shape, "legacy");

        // Name too short for the scan: only the absolute position finds it.
        assert_eq!(record.organization_name, "УП \"Минскзеленстрой\"");
        assert_eq!(source(&record, "organization_name"), "legacy-selector");

        assert_eq!(record.address, "223710, г. Солигорск, ул. Козлова, 35");

        // "УНП 200050803" is not a bare 9-digit cell; the digit run is
        // recovered from the legacy position.
        assert_eq!(record.tax_id, "200050803");
        assert_eq!(source(&record, "tax_id"), "legacy-selector");

        assert_eq!(record.proposal_end_date, "27.09.2026 12:00");
        assert_eq!(
            record.delivery_place,
            "г. Солигорск, ул. Козлова, 35, каб. 103"
        );
        assert_eq!(record.payment_terms, "предоплата 50 процентов");

        // No #lotsList on the oldest template; the positional row scan
        // recovers the single lot.
        assert_eq!(source(&record, "lots"), "table-scan");
        assert_eq!(record.lots.len(), 1);
        assert_eq!(record.lots[0].description, "Бумага офисная А4, 80 г/м2, класс С");
        assert_eq!(record.lots[0].count_text, "100 шт, 1 250.00 BYN");
    }

    // -----------------------------------------------------------------------
    // Failure and stability
    // -----------------------------------------------------------------------

    #[test]
    fn empty_document_is_a_parse_error() {
        let doc = Html::parse_document("");
        let result = Extractor::new().extract(&doc, &url("https://goszakupki.by/view/1"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_fields_stay_empty_without_error() {
        let doc = Html::parse_document("<html><body><p>пустая страница</p></body></html>");
        let record = Extractor::new()
            .extract(&doc, &url("https://goszakupki.by/view/2"))
            .unwrap();
        assert!(record.organization_name.is_empty());
        assert!(record.tax_id.is_empty());
        assert!(record.lots.is_empty());
        assert_eq!(source(&record, "organization_name"), "none");
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = load_fixture("marketing.html");
        let extractor = Extractor::new();
        let target = url("https://goszakupki.by/marketing/view/302875401");
        let first = extractor.extract(&doc, &target).unwrap();
        let second = extractor.extract(&doc, &target).unwrap();
        assert_eq!(first, second);
    }
}
