//! Line items and the `LineItems` trait shared by quotes and invoices.

use factura_shared::types::LineItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::document::error::DocumentError;
use crate::document::status::RecordKind;
use crate::totals::{self, DocumentTotals};

/// Default tax rate (percent) for a blank line.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// One priced row within a quote or invoice.
///
/// Quantity and price signs are not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifier, unique within the parent document's item list.
    pub id: LineItemId,
    /// Free-form description.
    pub description: String,
    /// Quantity (expected ≥ 0).
    pub quantity: Decimal,
    /// Price per unit, tax excluded.
    pub unit_price: Decimal,
    /// Tax rate as a percentage (20 means 20%).
    #[serde(rename = "tva", alias = "taxRate")]
    pub tax_rate: Decimal,
    /// Unit label ("Heure", "Forfait", ...).
    #[serde(default)]
    pub unit: String,
}

impl LineItem {
    /// Creates a line item with a fresh id.
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        tax_rate: Decimal,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: LineItemId::new(),
            description: description.into(),
            quantity,
            unit_price,
            tax_rate,
            unit: unit.into(),
        }
    }

    /// An empty row: quantity 1, price 0, default tax rate.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new(), Decimal::ONE, Decimal::ZERO, DEFAULT_TAX_RATE, "")
    }

    /// Pre-fills a row from a catalog product.
    ///
    /// Values are copied; the row keeps no link to the product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self::new(
            product.name.clone(),
            Decimal::ONE,
            product.unit_price,
            product.tax_rate,
            product.unit.clone(),
        )
    }

    /// Overwrites description, price, unit and tax rate from a product,
    /// keeping this row's id and quantity.
    pub fn apply_product(&mut self, product: &Product) {
        self.description.clone_from(&product.name);
        self.unit_price = product.unit_price;
        self.tax_rate = product.tax_rate;
        self.unit.clone_from(&product.unit);
    }

    /// Returns `quantity × unit_price`.
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    /// Returns the tax contribution of this row.
    #[must_use]
    pub fn tax_amount(&self) -> Decimal {
        self.net_amount() * self.tax_rate / Decimal::ONE_HUNDRED
    }
}

/// Documents that own an ordered list of line items.
///
/// Totals are always recomputed from the current items and never stored.
pub trait LineItems {
    /// Returns the items in display order.
    fn items(&self) -> &[LineItem];

    /// Returns the items for editing.
    fn items_mut(&mut self) -> &mut Vec<LineItem>;

    /// Computes subtotal, tax and grand total from the current items.
    fn totals(&self) -> DocumentTotals {
        totals::compute_totals(self.items())
    }

    /// Appends an item and returns its id.
    fn add_item(&mut self, item: LineItem) -> LineItemId {
        let id = item.id;
        self.items_mut().push(item);
        id
    }

    /// Removes an item by id. The last remaining item cannot be removed.
    fn remove_item(&mut self, id: LineItemId) -> Result<LineItem, DocumentError> {
        let items = self.items_mut();
        let position = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::LineItem, id))?;
        if items.len() == 1 {
            return Err(DocumentError::Validation(
                "a document must keep at least one line item".to_string(),
            ));
        }
        Ok(items.remove(position))
    }

    /// Returns a mutable reference to an item by id.
    fn item_mut(&mut self, id: LineItemId) -> Result<&mut LineItem, DocumentError> {
        self.items_mut()
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| DocumentError::not_found(RecordKind::LineItem, id))
    }

    /// Replaces the item that has the same id as `item`.
    fn update_item(&mut self, item: LineItem) -> Result<(), DocumentError> {
        let id = item.id;
        *self.item_mut(id)? = item;
        Ok(())
    }
}

/// Checks that line item ids are unique within one list.
pub(crate) fn validate_unique_ids(items: &[LineItem]) -> Result<(), DocumentError> {
    for (index, item) in items.iter().enumerate() {
        if items[..index].iter().any(|other| other.id == item.id) {
            return Err(DocumentError::Validation(format!(
                "duplicate line item id {}",
                item.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use factura_shared::types::ProductId;
    use rust_decimal_macros::dec;

    struct Items(Vec<LineItem>);

    impl LineItems for Items {
        fn items(&self) -> &[LineItem] {
            &self.0
        }

        fn items_mut(&mut self) -> &mut Vec<LineItem> {
            &mut self.0
        }
    }

    fn consulting() -> Product {
        Product {
            id: ProductId::new(),
            name: "Consulting SEO".to_string(),
            description: "Optimisation (par heure)".to_string(),
            unit_price: dec!(800),
            unit: "Heure".to_string(),
            tax_rate: dec!(20),
        }
    }

    #[test]
    fn test_blank_defaults() {
        let item = LineItem::blank();
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.unit_price, Decimal::ZERO);
        assert_eq!(item.tax_rate, dec!(20));
        assert!(item.description.is_empty());
    }

    #[test]
    fn test_amounts() {
        let item = LineItem::new("Hosting", dec!(2), dec!(100), dec!(20), "An");
        assert_eq!(item.net_amount(), dec!(200));
        assert_eq!(item.tax_amount(), dec!(40));
    }

    #[test]
    fn test_from_product_copies_values() {
        let mut product = consulting();
        let item = LineItem::from_product(&product);
        assert_eq!(item.description, "Consulting SEO");
        assert_eq!(item.unit_price, dec!(800));
        assert_eq!(item.unit, "Heure");

        product.unit_price = dec!(900);
        assert_eq!(item.unit_price, dec!(800));
    }

    #[test]
    fn test_apply_product_keeps_id_and_quantity() {
        let mut item = LineItem::new("old", dec!(10), dec!(1), dec!(0), "");
        let id = item.id;
        item.apply_product(&consulting());
        assert_eq!(item.id, id);
        assert_eq!(item.quantity, dec!(10));
        assert_eq!(item.unit_price, dec!(800));
        assert_eq!(item.tax_rate, dec!(20));
    }

    #[test]
    fn test_remove_item_keeps_last_row() {
        let first = LineItem::blank();
        let first_id = first.id;
        let mut items = Items(vec![first]);
        let second_id = items.add_item(LineItem::blank());

        assert!(items.remove_item(second_id).is_ok());
        assert!(matches!(
            items.remove_item(first_id),
            Err(DocumentError::Validation(_))
        ));
        assert_eq!(items.items().len(), 1);
    }

    #[test]
    fn test_remove_unknown_item() {
        let mut items = Items(vec![LineItem::blank(), LineItem::blank()]);
        assert!(matches!(
            items.remove_item(LineItemId::new()),
            Err(DocumentError::NotFound {
                kind: RecordKind::LineItem,
                ..
            })
        ));
    }

    #[test]
    fn test_item_mut_updates_in_place() {
        let mut items = Items(vec![LineItem::blank()]);
        let id = items.items()[0].id;
        items.item_mut(id).unwrap().quantity = dec!(3);
        assert_eq!(items.items()[0].quantity, dec!(3));
    }

    #[test]
    fn test_update_item_replaces_by_id() {
        let mut items = Items(vec![LineItem::blank(), LineItem::blank()]);
        let mut edited = items.items()[1].clone();
        edited.description = "Hébergement".to_string();
        items.update_item(edited).unwrap();
        assert_eq!(items.items()[1].description, "Hébergement");
        assert!(items.items()[0].description.is_empty());

        assert!(items.update_item(LineItem::blank()).is_err());
    }

    #[test]
    fn test_validate_unique_ids() {
        let item = LineItem::blank();
        assert!(validate_unique_ids(&[item.clone(), LineItem::blank()]).is_ok());
        assert!(validate_unique_ids(&[item.clone(), item]).is_err());
    }

    #[test]
    fn test_serializes_tax_rate_as_tva() {
        let item = LineItem::new("x", dec!(1), dec!(5), dec!(20), "u");
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("tva").is_some());
        assert!(json.get("unitPrice").is_some());
    }
}
