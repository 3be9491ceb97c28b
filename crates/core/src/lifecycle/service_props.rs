//! Property-based tests for lifecycle transitions.

use chrono::NaiveDate;
use factura_shared::types::{ClientId, QuoteId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::document::{LineItem, LineItems, Quote, QuoteStatus};
use crate::lifecycle::service::LifecycleService;

fn arb_quote_status() -> impl Strategy<Value = QuoteStatus> {
    prop::sample::select(QuoteStatus::ALL.to_vec())
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec((0i64..50, 0i64..1_000_000, 0i64..30), 1..6).prop_map(|rows| {
        rows.into_iter()
            .map(|(quantity, cents, rate)| {
                LineItem::new(
                    "row",
                    Decimal::from(quantity),
                    Decimal::new(cents, 2),
                    Decimal::from(rate),
                    "",
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Archive succeeds exactly from Accepted, Rejected and Archived.
    #[test]
    fn prop_archive_matches_status_rules(status in arb_quote_status()) {
        let result = LifecycleService::archive(status);
        prop_assert_eq!(result.is_ok(), status.can_archive() || status.is_terminal());
    }

    /// The edit path never moves a quote into or out of Archived.
    #[test]
    fn prop_edit_never_crosses_archived(
        stored in prop::option::of(arb_quote_status()),
        requested in arb_quote_status(),
    ) {
        let was_archived = stored == Some(QuoteStatus::Archived);
        let wants_archived = requested == QuoteStatus::Archived;
        let allowed = LifecycleService::validate_quote_edit(stored, requested).is_ok();
        prop_assert_eq!(allowed, was_archived == wants_archived);
    }

    /// Conversion preserves the totals of the source quote.
    #[test]
    fn prop_conversion_preserves_totals(
        items in arb_items(),
        status in prop::sample::select(QuoteStatus::EDITABLE.to_vec()),
        validity in 0u32..365,
    ) {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default();
        let quote = Quote {
            id: QuoteId::new(),
            quote_number: "DEV-2024-001".to_string(),
            client_id: ClientId::new(),
            issue_date: day,
            expiry_date: day,
            items,
            status,
            notes: None,
        };

        let conversion =
            LifecycleService::convert_to_invoice(&quote, "FAC-2024-001".to_string(), day, validity)
                .unwrap();
        prop_assert_eq!(conversion.invoice.totals(), quote.totals());
        prop_assert_eq!(conversion.quote.status, QuoteStatus::Accepted);
        prop_assert!(conversion.invoice.due_date >= day);
    }
}
