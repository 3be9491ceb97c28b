//! Property-based tests for payment reconciliation.

use chrono::NaiveDate;
use factura_shared::types::{ClientId, InvoiceId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::document::{Invoice, InvoiceDraft, InvoiceStatus, LineItem, LineItems};
use crate::payment::reconciler::ReconciliationService;
use crate::payment::types::{NewPayment, PaymentMethod};

/// Strategy for statuses an invoice may carry before a payment.
fn arb_status() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        Just(InvoiceStatus::Draft),
        Just(InvoiceStatus::Sent),
        Just(InvoiceStatus::PartiallyPaid),
        Just(InvoiceStatus::Paid),
        Just(InvoiceStatus::Overdue),
    ]
}

/// Strategy for an invoice with a strictly positive grand total.
fn arb_invoice() -> impl Strategy<Value = Invoice> {
    (1i64..100, 1i64..1_000_000, arb_status()).prop_map(|(quantity, cents, status)| {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        InvoiceDraft {
            id: None,
            invoice_number: "FAC-2024-001".to_string(),
            quote_id: None,
            client_id: Some(ClientId::new()),
            issue_date: day,
            due_date: day,
            items: vec![LineItem::new(
                "row",
                Decimal::from(quantity),
                Decimal::new(cents, 2),
                Decimal::from(20),
                "",
            )],
            status,
            notes: None,
        }
        .into_invoice(InvoiceId::new())
        .unwrap()
    })
}

fn payment(amount: Decimal) -> NewPayment {
    NewPayment::new(
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default(),
        amount,
        PaymentMethod::BankTransfer,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Paying exactly the grand total always yields Paid with zero balance.
    #[test]
    fn prop_exact_payment_is_paid(invoice in arb_invoice()) {
        let total = invoice.totals().grand_total;
        let outcome = ReconciliationService::apply_payment(&invoice, &[], payment(total)).unwrap();
        prop_assert_eq!(outcome.invoice.status, InvoiceStatus::Paid);
        prop_assert_eq!(outcome.reconciliation.balance_due, Decimal::ZERO);
    }

    /// A payment strictly between 0 and the total yields PartiallyPaid with a positive balance.
    #[test]
    fn prop_partial_payment_is_partially_paid(invoice in arb_invoice(), ratio in 1u32..100) {
        let total = invoice.totals().grand_total;
        let amount = total * Decimal::from(ratio) / Decimal::ONE_HUNDRED;
        prop_assume!(amount > Decimal::ZERO && amount < total);

        let outcome = ReconciliationService::apply_payment(&invoice, &[], payment(amount)).unwrap();
        prop_assert_eq!(outcome.invoice.status, InvoiceStatus::PartiallyPaid);
        prop_assert_eq!(outcome.reconciliation.balance_due, total - amount);
        prop_assert!(outcome.reconciliation.balance_due > Decimal::ZERO);
    }

    /// The written status always equals the status derived from the updated payment set.
    #[test]
    fn prop_written_status_matches_derivation(
        invoice in arb_invoice(),
        amounts in prop::collection::vec(1i64..500_000, 1..6),
    ) {
        let mut current = invoice;
        let mut payments = Vec::new();
        for cents in amounts {
            let outcome = ReconciliationService::apply_payment(
                &current,
                &payments,
                payment(Decimal::new(cents, 2)),
            )
            .unwrap();
            let derived = ReconciliationService::reconcile(&outcome.invoice, &outcome.payments);
            prop_assert_eq!(outcome.invoice.status, derived.status);
            prop_assert_eq!(outcome.payments.len(), payments.len() + 1);
            current = outcome.invoice;
            payments = outcome.payments;
        }
        prop_assert!(current.status.is_payment_derived());
    }

    /// total_paid + balance_due always equals the grand total.
    #[test]
    fn prop_paid_plus_balance_is_total(invoice in arb_invoice(), cents in 1i64..10_000_000) {
        let outcome = ReconciliationService::apply_payment(
            &invoice,
            &[],
            payment(Decimal::new(cents, 2)),
        )
        .unwrap();
        let r = outcome.reconciliation;
        prop_assert_eq!(r.total_paid + r.balance_due, r.grand_total);
    }
}
