//! Product catalog entries.

use factura_shared::types::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::DocumentError;
use crate::document::line_item::DEFAULT_TAX_RATE;

/// A catalog entry used to pre-fill line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Name, copied into the line item description.
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Price per unit, tax excluded.
    pub unit_price: Decimal,
    /// Unit label.
    #[serde(default)]
    pub unit: String,
    /// Tax rate as a percentage.
    #[serde(rename = "tva", alias = "taxRate")]
    pub tax_rate: Decimal,
}

/// A product being created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Existing id, or `None` for a new product.
    #[serde(default)]
    pub id: Option<ProductId>,
    /// Name.
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Price per unit, tax excluded.
    pub unit_price: Decimal,
    /// Unit label.
    #[serde(default)]
    pub unit: String,
    /// Tax rate as a percentage.
    #[serde(rename = "tva", alias = "taxRate")]
    pub tax_rate: Decimal,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            unit_price: Decimal::ZERO,
            unit: String::new(),
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl ProductDraft {
    /// Validates the draft and turns it into a product with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Validation` if the name is blank.
    pub fn into_product(self, id: ProductId) -> Result<Product, DocumentError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DocumentError::Validation(
                "product name is required".to_string(),
            ));
        }
        Ok(Product {
            id,
            name,
            description: self.description,
            unit_price: self.unit_price,
            unit: self.unit,
            tax_rate: self.tax_rate,
        })
    }
}
