//! Merges DOM-extracted fields with registry enrichment into the final
//! [`ProcurementRecord`].
//!
//! Precedence is fixed: registry short name, then registry full name, then
//! the DOM value; registry address over DOM address. An empty registry
//! field never erases a non-empty DOM value.

use offergen_extract::{Lexicon, NoticeRecord, normalize_quantity};
use offergen_shared::{LotEntry, ProcurementRecord, RegistryRecord};

/// Build the final record from a raw DOM extraction and an optional
/// registry match.
pub fn assemble(
    notice: NoticeRecord,
    registry: Option<RegistryRecord>,
    lexicon: &Lexicon,
) -> ProcurementRecord {
    let lots: Vec<LotEntry> = notice
        .lots
        .into_iter()
        .map(|lot| {
            let (quantity, unit) = normalize_quantity(&lot.count_text, lexicon);
            LotEntry {
                description: lot.description,
                quantity,
                unit,
            }
        })
        .collect();

    let (organization_name, tax_id, address) = match &registry {
        Some(reg) => (
            pick3(&reg.short_name, &reg.full_name, notice.organization_name),
            pick2(&reg.tax_id, notice.tax_id),
            pick2(&reg.address, notice.address),
        ),
        None => (notice.organization_name, notice.tax_id, notice.address),
    };

    ProcurementRecord {
        organization_name,
        tax_id,
        address,
        delivery_place: notice.delivery_place,
        payment_terms: notice.payment_terms,
        proposal_end_date: notice.proposal_end_date,
        lots,
        registry,
        diagnostics: Some(notice.diagnostics),
    }
}

fn pick2(preferred: &str, fallback: String) -> String {
    if preferred.is_empty() {
        fallback
    } else {
        preferred.to_string()
    }
}

fn pick3(first: &str, second: &str, fallback: String) -> String {
    if !first.is_empty() {
        first.to_string()
    } else if !second.is_empty() {
        second.to_string()
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offergen_extract::RawLot;

    fn dom_notice() -> NoticeRecord {
        NoticeRecord {
            organization_name: "Общество с ограниченной ответственностью \"Ромашка\"".into(),
            tax_id: "100099572".into(),
            address: "г. Минск, ул. Ленина, 1 (со страницы)".into(),
            delivery_place: "г. Минск".into(),
            payment_terms: "отсрочка 30 дней".into(),
            proposal_end_date: "01.09.2026 10:00".into(),
            lots: vec![RawLot {
                description: "Услуги связи".into(),
                count_text: "12 месяц(мес), 14 400.00 BYN".into(),
            }],
            diagnostics: Default::default(),
        }
    }

    fn registry_record() -> RegistryRecord {
        RegistryRecord {
            tax_id: "100099572".into(),
            full_name: "Общество с ограниченной ответственностью \"Ромашка\"".into(),
            short_name: "ООО Ромашка".into(),
            address: "220030, г. Минск, ул. Ленина, 1".into(),
            registration_date: "15.03.2001".into(),
            status_code: "1".into(),
            status_name: "Действующий".into(),
            removal_date: String::new(),
        }
    }

    #[test]
    fn registry_values_supersede_dom_values() {
        let record = assemble(dom_notice(), Some(registry_record()), &Lexicon::default());

        assert_eq!(record.organization_name, "ООО Ромашка");
        assert_eq!(record.address, "220030, г. Минск, ул. Ленина, 1");
        assert_eq!(record.tax_id, "100099572");
        assert!(record.registry.is_some());
    }

    #[test]
    fn empty_registry_short_name_falls_back_to_full_name() {
        let mut reg = registry_record();
        reg.short_name = String::new();
        let record = assemble(dom_notice(), Some(reg), &Lexicon::default());
        assert_eq!(
            record.organization_name,
            "Общество с ограниченной ответственностью \"Ромашка\""
        );
    }

    #[test]
    fn empty_registry_address_keeps_dom_address() {
        let mut reg = registry_record();
        reg.address = String::new();
        let record = assemble(dom_notice(), Some(reg), &Lexicon::default());
        assert_eq!(record.address, "г. Минск, ул. Ленина, 1 (со страницы)");
    }

    #[test]
    fn no_registry_passes_dom_values_through() {
        let record = assemble(dom_notice(), None, &Lexicon::default());

        assert_eq!(
            record.organization_name,
            "Общество с ограниченной ответственностью \"Ромашка\""
        );
        assert_eq!(record.address, "г. Минск, ул. Ленина, 1 (со страницы)");
        assert!(record.registry.is_none());
    }

    #[test]
    fn lots_are_quantity_normalized() {
        let record = assemble(dom_notice(), None, &Lexicon::default());

        assert_eq!(record.lots.len(), 1);
        assert_eq!(record.lots[0].description, "Услуги связи");
        assert_eq!(record.lots[0].quantity, 12);
        assert_eq!(record.lots[0].unit, "месяц(мес)");
    }

    #[test]
    fn diagnostics_travel_into_the_final_record() {
        let mut notice = dom_notice();
        notice.diagnostics.page_shape = "marketing".into();
        let record = assemble(notice, None, &Lexicon::default());
        assert_eq!(record.diagnostics.unwrap().page_shape, "marketing");
    }
}
