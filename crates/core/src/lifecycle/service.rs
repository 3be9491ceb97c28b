//! Lifecycle service for quote and invoice state transitions.

use chrono::{Days, NaiveDate};
use factura_shared::types::{ClientId, InvoiceId};

use crate::document::{
    DocumentError, DocumentKind, Invoice, InvoiceDraft, InvoiceStatus, LineItem, Quote,
    QuoteDraft, QuoteStatus,
};
use crate::lifecycle::types::{ArchiveOutcome, Conversion};

/// Returns `today` plus `days`, saturating at the last representable date.
#[must_use]
pub fn due_date_from(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Stateless service for document lifecycle transitions.
///
/// All methods are associated functions that validate a transition and
/// return the new state; persisting it is the caller's job.
pub struct LifecycleService;

impl LifecycleService {
    /// Creates a quote skeleton.
    ///
    /// The draft has no id yet, a single blank line, `issue_date = today`,
    /// `expiry_date = today + validity_days`, and status `Draft`. The number
    /// is taken as given: it is proposed once, when the skeleton is created.
    #[must_use]
    pub fn new_quote_draft(
        quote_number: String,
        client_id: Option<ClientId>,
        today: NaiveDate,
        validity_days: u32,
    ) -> QuoteDraft {
        QuoteDraft {
            id: None,
            quote_number,
            client_id,
            issue_date: today,
            expiry_date: due_date_from(today, validity_days),
            items: vec![LineItem::blank()],
            status: QuoteStatus::Draft,
            notes: None,
        }
    }

    /// Creates an invoice skeleton, with `due_date = today + validity_days`.
    #[must_use]
    pub fn new_invoice_draft(
        invoice_number: String,
        client_id: Option<ClientId>,
        today: NaiveDate,
        validity_days: u32,
    ) -> InvoiceDraft {
        InvoiceDraft {
            id: None,
            invoice_number,
            quote_id: None,
            client_id,
            issue_date: today,
            due_date: due_date_from(today, validity_days),
            items: vec![LineItem::blank()],
            status: InvoiceStatus::Draft,
            notes: None,
        }
    }

    /// Archive a quote.
    ///
    /// # Returns
    /// * `Ok(ArchiveOutcome::Archived)` from `Accepted` or `Rejected`
    /// * `Ok(ArchiveOutcome::AlreadyArchived)` from `Archived`
    /// * `Err(DocumentError::InvalidTransition)` from any other status
    pub fn archive(current_status: QuoteStatus) -> Result<ArchiveOutcome, DocumentError> {
        match current_status {
            QuoteStatus::Accepted | QuoteStatus::Rejected => Ok(ArchiveOutcome::Archived),
            QuoteStatus::Archived => Ok(ArchiveOutcome::AlreadyArchived),
            _ => Err(Self::invalid_quote(current_status, QuoteStatus::Archived)),
        }
    }

    /// Validate the status chosen when saving a quote through the edit form.
    ///
    /// The edit form may set any status freely except that `Archived` can
    /// neither be chosen nor left: it is reachable only through `archive`.
    ///
    /// # Arguments
    /// * `stored` - The status currently persisted, `None` for a new quote
    /// * `requested` - The status in the submitted draft
    pub fn validate_quote_edit(
        stored: Option<QuoteStatus>,
        requested: QuoteStatus,
    ) -> Result<(), DocumentError> {
        match (stored, requested) {
            (Some(QuoteStatus::Archived), QuoteStatus::Archived) => Ok(()),
            (Some(QuoteStatus::Archived), to) => {
                Err(Self::invalid_quote(QuoteStatus::Archived, to))
            }
            (from, QuoteStatus::Archived) => Err(Self::invalid_quote(
                from.unwrap_or(QuoteStatus::Draft),
                QuoteStatus::Archived,
            )),
            _ => Ok(()),
        }
    }

    /// Convert a quote into a new invoice.
    ///
    /// The invoice gets a fresh id, the given number, the quote's client,
    /// a by-value copy of its items, `issue_date = today`,
    /// `due_date = today + validity_days`, status `Draft`, and a back
    /// reference to the quote. The quote becomes `Accepted`.
    ///
    /// Converting an already-converted quote is allowed and yields a second,
    /// independent invoice. The `Accepted` precondition is a UI affordance
    /// (`QuoteStatus::can_convert`) and is not checked here.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidTransition` for an archived quote.
    pub fn convert_to_invoice(
        quote: &Quote,
        invoice_number: String,
        today: NaiveDate,
        validity_days: u32,
    ) -> Result<Conversion, DocumentError> {
        if quote.status.is_terminal() {
            return Err(Self::invalid_quote(quote.status, QuoteStatus::Accepted));
        }

        let invoice = Invoice {
            id: InvoiceId::new(),
            invoice_number,
            quote_id: Some(quote.id),
            client_id: quote.client_id,
            issue_date: today,
            due_date: due_date_from(today, validity_days),
            items: quote.items.clone(),
            status: InvoiceStatus::Draft,
            notes: quote.notes.clone(),
        };

        let mut accepted = quote.clone();
        accepted.status = QuoteStatus::Accepted;

        Ok(Conversion {
            quote: accepted,
            invoice,
        })
    }

    /// Check if a quote status transition follows the lifecycle.
    ///
    /// Valid transitions:
    /// - Draft → Sent
    /// - Sent → Accepted | Rejected
    /// - Accepted | Rejected → Archived
    #[must_use]
    pub fn is_valid_quote_transition(from: QuoteStatus, to: QuoteStatus) -> bool {
        matches!(
            (from, to),
            (QuoteStatus::Draft, QuoteStatus::Sent)
                | (
                    QuoteStatus::Sent,
                    QuoteStatus::Accepted | QuoteStatus::Rejected
                )
                | (
                    QuoteStatus::Accepted | QuoteStatus::Rejected,
                    QuoteStatus::Archived
                )
        )
    }

    /// Check if an invoice status transition follows the lifecycle.
    ///
    /// Valid transitions:
    /// - Draft → Sent
    /// - Sent | Overdue → PartiallyPaid | Paid
    /// - PartiallyPaid → Paid
    /// - Draft | Sent | PartiallyPaid → Overdue
    #[must_use]
    pub fn is_valid_invoice_transition(from: InvoiceStatus, to: InvoiceStatus) -> bool {
        matches!(
            (from, to),
            (InvoiceStatus::Draft, InvoiceStatus::Sent)
                | (
                    InvoiceStatus::Sent | InvoiceStatus::Overdue,
                    InvoiceStatus::PartiallyPaid | InvoiceStatus::Paid
                )
                | (InvoiceStatus::PartiallyPaid, InvoiceStatus::Paid)
                | (
                    InvoiceStatus::Draft | InvoiceStatus::Sent | InvoiceStatus::PartiallyPaid,
                    InvoiceStatus::Overdue
                )
        )
    }

    fn invalid_quote(from: QuoteStatus, to: QuoteStatus) -> DocumentError {
        DocumentError::InvalidTransition {
            kind: DocumentKind::Quote,
            from: from.as_str(),
            to: to.as_str(),
        }
    }
}
