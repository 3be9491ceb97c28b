//! Payment reconciliation.
//!
//! Recomputes what has been paid on an invoice, what remains, and the
//! status that follows from it.

use factura_shared::types::{InvoiceId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::{DocumentError, Invoice, InvoiceStatus, LineItems};
use crate::payment::types::{NewPayment, Payment};

/// Result of reconciling an invoice against its payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// The reconciled invoice.
    pub invoice_id: InvoiceId,
    /// Grand total of the invoice items.
    pub grand_total: Decimal,
    /// Sum of matching payments.
    pub total_paid: Decimal,
    /// grand total − total paid. Negative when overpaid.
    pub balance_due: Decimal,
    /// Status derived from the amounts.
    pub status: InvoiceStatus,
}

impl Reconciliation {
    /// Returns true if more was paid than invoiced.
    #[must_use]
    pub fn is_overpaid(&self) -> bool {
        self.balance_due < Decimal::ZERO
    }
}

/// Everything that changes when a payment is recorded.
///
/// The caller persists `payments` and `invoice` together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// The newly created payment.
    pub payment: Payment,
    /// The full payment collection including the new payment.
    pub payments: Vec<Payment>,
    /// The invoice with its derived status written.
    pub invoice: Invoice,
    /// Amounts after the payment.
    pub reconciliation: Reconciliation,
}

/// Stateless reconciliation service.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Sums the payments recorded against `invoice_id`.
    #[must_use]
    pub fn total_paid(invoice_id: InvoiceId, payments: &[Payment]) -> Decimal {
        payments
            .iter()
            .filter(|payment| payment.invoice_id == invoice_id)
            .map(|payment| payment.amount)
            .sum()
    }

    /// Derives the status that follows a payment.
    ///
    /// - `Paid` if `total_paid ≥ grand_total`
    /// - `PartiallyPaid` if `0 < total_paid < grand_total`
    /// - `Sent` otherwise; a zero-paid invoice never moves back to Draft
    #[must_use]
    pub fn derive_status(total_paid: Decimal, grand_total: Decimal) -> InvoiceStatus {
        if total_paid >= grand_total {
            InvoiceStatus::Paid
        } else if total_paid > Decimal::ZERO {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Sent
        }
    }

    /// Reconciles an invoice against the given payments.
    #[must_use]
    pub fn reconcile(invoice: &Invoice, payments: &[Payment]) -> Reconciliation {
        let grand_total = invoice.totals().grand_total;
        let total_paid = Self::total_paid(invoice.id, payments);

        Reconciliation {
            invoice_id: invoice.id,
            grand_total,
            total_paid,
            balance_due: grand_total - total_paid,
            status: Self::derive_status(total_paid, grand_total),
        }
    }

    /// Current amounts without deriving a new status: the reported status
    /// is whatever the invoice carries.
    #[must_use]
    pub fn balance(invoice: &Invoice, payments: &[Payment]) -> Reconciliation {
        Reconciliation {
            status: invoice.status,
            ..Self::reconcile(invoice, payments)
        }
    }

    /// Records a payment: appends it, recomputes against the updated
    /// payment set, and writes the derived status onto the invoice.
    ///
    /// Nothing is mutated; the caller persists the outcome as one unit.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Validation` if the amount is not positive.
    pub fn apply_payment(
        invoice: &Invoice,
        payments: &[Payment],
        new_payment: NewPayment,
    ) -> Result<PaymentOutcome, DocumentError> {
        if new_payment.amount <= Decimal::ZERO {
            return Err(DocumentError::Validation(format!(
                "payment amount must be positive, got {}",
                new_payment.amount
            )));
        }

        let payment = Payment {
            id: PaymentId::new(),
            invoice_id: invoice.id,
            date: new_payment.date,
            amount: new_payment.amount,
            method: new_payment.method,
        };

        let mut updated_payments = payments.to_vec();
        updated_payments.push(payment.clone());

        let reconciliation = Self::reconcile(invoice, &updated_payments);
        let mut updated_invoice = invoice.clone();
        updated_invoice.status = reconciliation.status;

        Ok(PaymentOutcome {
            payment,
            payments: updated_payments,
            invoice: updated_invoice,
            reconciliation,
        })
    }

    /// Settles the status requested through the edit form against payments.
    ///
    /// With payments recorded, the derived status wins. With none, a
    /// requested `Paid`/`PartiallyPaid` falls back to `Sent`; any other
    /// requested status (including `Overdue`) is kept.
    #[must_use]
    pub fn settle_edited_status(
        requested: InvoiceStatus,
        total_paid: Decimal,
        grand_total: Decimal,
    ) -> InvoiceStatus {
        if total_paid > Decimal::ZERO {
            Self::derive_status(total_paid, grand_total)
        } else if requested.is_payment_derived() {
            InvoiceStatus::Sent
        } else {
            requested
        }
    }

    /// Amount proposed for the next payment: the remaining balance, never negative.
    #[must_use]
    pub fn suggested_amount(invoice: &Invoice, payments: &[Payment]) -> Decimal {
        Self::reconcile(invoice, payments)
            .balance_due
            .max(Decimal::ZERO)
    }
}
