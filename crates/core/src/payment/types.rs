//! Payment domain types.

use chrono::NaiveDate;
use factura_shared::types::{InvoiceId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer.
    #[default]
    #[serde(alias = "Virement bancaire")]
    BankTransfer,
    /// Cheque.
    #[serde(alias = "Chèque")]
    Cheque,
    /// Cash.
    #[serde(alias = "Espèces")]
    Cash,
    /// Credit card.
    #[serde(alias = "Carte de crédit")]
    Card,
    /// Anything else.
    #[serde(alias = "Autre")]
    Other,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Other => "other",
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BankTransfer => "Virement bancaire",
            Self::Cheque => "Chèque",
            Self::Cash => "Espèces",
            Self::Card => "Carte de crédit",
            Self::Other => "Autre",
        }
    }

    /// Parses a method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "bank_transfer" | "transfer" => Some(Self::BankTransfer),
            "cheque" | "check" => Some(Self::Cheque),
            "cash" => Some(Self::Cash),
            "card" => Some(Self::Card),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded payment against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The invoice being paid. Payments are deleted with their invoice.
    pub invoice_id: InvoiceId,
    /// Date the payment was received.
    pub date: NaiveDate,
    /// Amount received (expected > 0).
    pub amount: Decimal,
    /// How it was paid.
    pub method: PaymentMethod,
}

/// Input for recording a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// Date the payment was received.
    pub date: NaiveDate,
    /// Amount received.
    pub amount: Decimal,
    /// How it was paid.
    pub method: PaymentMethod,
}

impl NewPayment {
    /// Creates a new payment input.
    #[must_use]
    pub fn new(date: NaiveDate, amount: Decimal, method: PaymentMethod) -> Self {
        Self {
            date,
            amount,
            method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!(PaymentMethod::parse("cash"), Some(PaymentMethod::Cash));
        assert_eq!(
            PaymentMethod::parse("Bank-Transfer"),
            Some(PaymentMethod::BankTransfer)
        );
        assert_eq!(PaymentMethod::parse("check"), Some(PaymentMethod::Cheque));
        assert_eq!(PaymentMethod::parse("bitcoin"), None);
    }

    #[test]
    fn test_method_legacy_label() {
        let method: PaymentMethod = serde_json::from_str("\"Carte de crédit\"").unwrap();
        assert_eq!(method, PaymentMethod::Card);
        assert_eq!(method.label(), "Carte de crédit");
    }

    #[test]
    fn test_default_method_is_transfer() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::BankTransfer);
    }
}
