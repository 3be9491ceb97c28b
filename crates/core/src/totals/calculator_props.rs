//! Property-based tests for the monetary calculator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::document::LineItem;
use crate::totals::compute_totals;

/// Strategy for a line item with two-decimal prices and common tax rates.
fn arb_item() -> impl Strategy<Value = LineItem> {
    (
        0i64..1_000,
        0i64..10_000_000,
        prop_oneof![Just(0i64), Just(7), Just(10), Just(14), Just(20)],
    )
        .prop_map(|(quantity, cents, tax)| {
            LineItem::new(
                "row",
                Decimal::from(quantity),
                Decimal::new(cents, 2),
                Decimal::from(tax),
                "",
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// grand_total = subtotal + tax_total exactly.
    #[test]
    fn prop_grand_total_is_exact_sum(items in prop::collection::vec(arb_item(), 1..20)) {
        let totals = compute_totals(&items);
        prop_assert_eq!(totals.grand_total, totals.subtotal + totals.tax_total);
    }

    /// Totals do not depend on item order.
    #[test]
    fn prop_totals_are_order_independent(items in prop::collection::vec(arb_item(), 1..20)) {
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(compute_totals(&items), compute_totals(&reversed));
    }

    /// Appending a row adds exactly that row's amounts.
    #[test]
    fn prop_totals_are_additive(
        items in prop::collection::vec(arb_item(), 0..10),
        extra in arb_item(),
    ) {
        let before = compute_totals(&items);
        let mut with_extra = items.clone();
        with_extra.push(extra.clone());
        let after = compute_totals(&with_extra);

        prop_assert_eq!(after.subtotal, before.subtotal + extra.net_amount());
        prop_assert_eq!(after.tax_total, before.tax_total + extra.tax_amount());
    }
}
