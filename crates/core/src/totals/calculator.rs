//! Subtotal, tax and grand total computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::LineItem;

/// Totals of a document, recomputed on demand from its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Σ quantity × unit price.
    pub subtotal: Decimal,
    /// Σ quantity × unit price × tax rate / 100.
    pub tax_total: Decimal,
    /// subtotal + tax total.
    pub grand_total: Decimal,
}

impl DocumentTotals {
    /// Creates totals from a subtotal and a tax total.
    #[must_use]
    pub fn new(subtotal: Decimal, tax_total: Decimal) -> Self {
        Self {
            subtotal,
            tax_total,
            grand_total: subtotal + tax_total,
        }
    }
}

/// Computes the totals of an ordered list of line items.
///
/// An empty list yields all-zero totals. Negative quantities or prices are
/// summed as-is.
#[must_use]
pub fn compute_totals(items: &[LineItem]) -> DocumentTotals {
    let subtotal: Decimal = items.iter().map(LineItem::net_amount).sum();
    let tax_total: Decimal = items.iter().map(LineItem::tax_amount).sum();

    DocumentTotals::new(subtotal, tax_total)
}

/// Shorthand for `compute_totals(items).grand_total`.
#[must_use]
pub fn grand_total(items: &[LineItem]) -> Decimal {
    compute_totals(items).grand_total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, unit_price: Decimal, tax_rate: Decimal) -> LineItem {
        LineItem::new("row", quantity, unit_price, tax_rate, "")
    }

    #[test]
    fn test_empty_items_are_zero() {
        let totals = compute_totals(&[]);
        assert_eq!(totals, DocumentTotals::default());
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn test_seed_quote_totals() {
        let items = vec![
            item(dec!(1), dec!(25000), dec!(20)),
            item(dec!(1), dec!(1500), dec!(20)),
        ];
        let totals = compute_totals(&items);
        assert_eq!(totals.subtotal, dec!(26500));
        assert_eq!(totals.tax_total, dec!(5300));
        assert_eq!(totals.grand_total, dec!(31800));
    }

    #[rstest]
    #[case(dec!(2), dec!(100), dec!(20), dec!(200), dec!(40))]
    #[case(dec!(3), dec!(19.99), dec!(7), dec!(59.97), dec!(4.1979))]
    #[case(dec!(1), dec!(1000), dec!(0), dec!(1000), dec!(0))]
    #[case(dec!(-1), dec!(50), dec!(20), dec!(-50), dec!(-10))]
    fn test_single_row(
        #[case] quantity: Decimal,
        #[case] unit_price: Decimal,
        #[case] tax_rate: Decimal,
        #[case] subtotal: Decimal,
        #[case] tax_total: Decimal,
    ) {
        let totals = compute_totals(&[item(quantity, unit_price, tax_rate)]);
        assert_eq!(totals.subtotal, subtotal);
        assert_eq!(totals.tax_total, tax_total);
        assert_eq!(totals.grand_total, subtotal + tax_total);
    }

    #[test]
    fn test_mixed_tax_rates_are_not_rounded() {
        let items = vec![
            item(dec!(1), dec!(10.01), dec!(5.5)),
            item(dec!(2), dec!(3.33), dec!(20)),
        ];
        let totals = compute_totals(&items);
        assert_eq!(totals.subtotal, dec!(16.67));
        assert_eq!(totals.tax_total, dec!(0.550550) + dec!(1.332));
        assert_eq!(grand_total(&items), totals.grand_total);
    }
}
