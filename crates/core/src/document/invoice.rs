//! Invoice aggregate and its draft form.

use chrono::NaiveDate;
use factura_shared::types::{ClientId, InvoiceId, QuoteId};
use serde::{Deserialize, Serialize};

use crate::document::error::DocumentError;
use crate::document::line_item::{self, LineItem, LineItems};
use crate::document::status::InvoiceStatus;

/// A saved invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Human-readable number (`FAC-2024-001`).
    pub invoice_number: String,
    /// The quote this invoice was converted from, if any. May dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<QuoteId>,
    /// The billed client. May dangle if the client was deleted.
    pub client_id: ClientId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Priced rows, owned by this invoice.
    pub items: Vec<LineItem>,
    /// Current status.
    pub status: InvoiceStatus,
    /// Optional notes printed on the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Invoice {
    /// Returns an editable draft of this invoice.
    #[must_use]
    pub fn to_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            id: Some(self.id),
            invoice_number: self.invoice_number.clone(),
            quote_id: self.quote_id,
            client_id: Some(self.client_id),
            issue_date: self.issue_date,
            due_date: self.due_date,
            items: self.items.clone(),
            status: self.status,
            notes: self.notes.clone(),
        }
    }

    /// Returns true if the due date has passed and the invoice is not paid.
    ///
    /// This never changes the status; `Overdue` is set by hand.
    #[must_use]
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status != InvoiceStatus::Paid && self.due_date < today
    }
}

impl LineItems for Invoice {
    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }
}

/// An invoice being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Existing id, or `None` for a new invoice.
    pub id: Option<InvoiceId>,
    /// Proposed number, computed when the draft was created.
    pub invoice_number: String,
    /// Originating quote, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<QuoteId>,
    /// Selected client, if any yet.
    pub client_id: Option<ClientId>,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Priced rows.
    pub items: Vec<LineItem>,
    /// Status chosen in the form.
    pub status: InvoiceStatus,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InvoiceDraft {
    /// Validates the draft and turns it into a saved invoice with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Validation` if no client is selected, the
    /// number is empty, or line item ids repeat.
    pub fn into_invoice(self, id: InvoiceId) -> Result<Invoice, DocumentError> {
        let client_id = self
            .client_id
            .ok_or_else(|| DocumentError::Validation("a client is required".to_string()))?;
        if self.invoice_number.trim().is_empty() {
            return Err(DocumentError::Validation(
                "invoice number is required".to_string(),
            ));
        }
        line_item::validate_unique_ids(&self.items)?;

        Ok(Invoice {
            id,
            invoice_number: self.invoice_number,
            quote_id: self.quote_id,
            client_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            items: self.items,
            status: self.status,
            notes: self.notes.filter(|notes| !notes.trim().is_empty()),
        })
    }
}

impl LineItems for InvoiceDraft {
    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }
}
