//! Report generation service.

use std::cmp::Reverse;

use chrono::NaiveDate;
use factura_shared::types::ClientId;
use rust_decimal::Decimal;

use super::types::{ClientAccountSummary, DashboardSummary, QuoteExpiry, RECENT_DOCUMENTS_LIMIT};
use crate::catalog::Client;
use crate::document::{Invoice, InvoiceStatus, LineItems, Quote, QuoteStatus};
use crate::lifecycle::due_date_from;
use crate::payment::{Payment, ReconciliationService};

/// Service for building read-only summaries.
pub struct ReportService;

impl ReportService {
    /// Computes the expiry indicator of a quote.
    ///
    /// Only `Draft` and `Sent` quotes carry one. A quote expiring exactly
    /// `warning_days` from today is still "expiring soon".
    #[must_use]
    pub fn quote_expiry(quote: &Quote, today: NaiveDate, warning_days: u32) -> Option<QuoteExpiry> {
        if !quote.status.is_open() {
            return None;
        }
        if quote.expiry_date < today {
            Some(QuoteExpiry::Expired)
        } else if quote.expiry_date <= due_date_from(today, warning_days) {
            Some(QuoteExpiry::ExpiringSoon)
        } else {
            None
        }
    }

    /// Returns the quotes to list, newest issue date first.
    ///
    /// Archived quotes are hidden unless `include_archived` is set.
    #[must_use]
    pub fn quote_listing(quotes: &[Quote], include_archived: bool) -> Vec<Quote> {
        let mut listed: Vec<Quote> = quotes
            .iter()
            .filter(|quote| include_archived || quote.status != QuoteStatus::Archived)
            .cloned()
            .collect();
        listed.sort_by_key(|quote| Reverse(quote.issue_date));
        listed
    }

    /// Returns the invoices to list, newest issue date first.
    #[must_use]
    pub fn invoice_listing(invoices: &[Invoice]) -> Vec<Invoice> {
        let mut listed = invoices.to_vec();
        listed.sort_by_key(|invoice| Reverse(invoice.issue_date));
        listed
    }

    /// Generates the dashboard summary.
    ///
    /// The recent lists follow collection order, so an edited document keeps
    /// its place.
    #[must_use]
    pub fn generate_dashboard(
        clients: &[Client],
        quotes: &[Quote],
        invoices: &[Invoice],
    ) -> DashboardSummary {
        let pending_quotes = quotes
            .iter()
            .filter(|quote| quote.status == QuoteStatus::Sent)
            .count();
        let unpaid_invoices = invoices
            .iter()
            .filter(|invoice| invoice.status.is_awaiting_payment())
            .count();
        let revenue: Decimal = invoices
            .iter()
            .filter(|invoice| invoice.status == InvoiceStatus::Paid)
            .map(|invoice| invoice.totals().grand_total)
            .sum();

        DashboardSummary {
            total_clients: clients.len(),
            pending_quotes,
            unpaid_invoices,
            revenue,
            recent_quotes: Self::most_recent(quotes),
            recent_invoices: Self::most_recent(invoices),
        }
    }

    /// Generates the account summary of one client.
    #[must_use]
    pub fn generate_client_summary(
        client_id: ClientId,
        quotes: &[Quote],
        invoices: &[Invoice],
        payments: &[Payment],
    ) -> ClientAccountSummary {
        let quotes: Vec<Quote> = quotes
            .iter()
            .filter(|quote| quote.client_id == client_id)
            .cloned()
            .collect();
        let invoices: Vec<Invoice> = invoices
            .iter()
            .filter(|invoice| invoice.client_id == client_id)
            .cloned()
            .collect();

        let total_billed: Decimal = invoices
            .iter()
            .map(|invoice| invoice.totals().grand_total)
            .sum();
        let total_paid: Decimal = invoices
            .iter()
            .map(|invoice| ReconciliationService::total_paid(invoice.id, payments))
            .sum();

        ClientAccountSummary {
            client_id,
            quotes: Self::quote_listing(&quotes, true),
            invoices: Self::invoice_listing(&invoices),
            total_billed,
            total_paid,
            outstanding: total_billed - total_paid,
        }
    }

    /// Returns the last `RECENT_DOCUMENTS_LIMIT` entries, last added first.
    fn most_recent<T: Clone>(documents: &[T]) -> Vec<T> {
        documents
            .iter()
            .rev()
            .take(RECENT_DOCUMENTS_LIMIT)
            .cloned()
            .collect()
    }
}
