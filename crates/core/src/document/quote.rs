//! Quote aggregate and its draft form.

use chrono::NaiveDate;
use factura_shared::types::{ClientId, QuoteId};
use serde::{Deserialize, Serialize};

use crate::document::error::DocumentError;
use crate::document::line_item::{self, LineItem, LineItems};
use crate::document::status::QuoteStatus;

/// A saved quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique identifier.
    pub id: QuoteId,
    /// Human-readable number (`DEV-2024-001`).
    pub quote_number: String,
    /// The client this quote is addressed to. May dangle if the client was deleted.
    pub client_id: ClientId,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Date after which the offer lapses.
    pub expiry_date: NaiveDate,
    /// Priced rows.
    pub items: Vec<LineItem>,
    /// Current status.
    pub status: QuoteStatus,
    /// Optional notes printed on the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Quote {
    /// Returns an editable draft of this quote.
    #[must_use]
    pub fn to_draft(&self) -> QuoteDraft {
        QuoteDraft {
            id: Some(self.id),
            quote_number: self.quote_number.clone(),
            client_id: Some(self.client_id),
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            items: self.items.clone(),
            status: self.status,
            notes: self.notes.clone(),
        }
    }
}

impl LineItems for Quote {
    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }
}

/// A quote being edited.
///
/// `id` is `None` until the quote is saved for the first time, so cancelling
/// an unsaved draft leaves no trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    /// Existing id, or `None` for a new quote.
    pub id: Option<QuoteId>,
    /// Proposed number, computed when the draft was created.
    pub quote_number: String,
    /// Selected client, if any yet.
    pub client_id: Option<ClientId>,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Expiry date.
    pub expiry_date: NaiveDate,
    /// Priced rows.
    pub items: Vec<LineItem>,
    /// Status chosen in the form.
    pub status: QuoteStatus,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl QuoteDraft {
    /// Validates the draft and turns it into a saved quote with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Validation` if no client is selected, the
    /// number is empty, or line item ids repeat.
    pub fn into_quote(self, id: QuoteId) -> Result<Quote, DocumentError> {
        let client_id = self
            .client_id
            .ok_or_else(|| DocumentError::Validation("a client is required".to_string()))?;
        if self.quote_number.trim().is_empty() {
            return Err(DocumentError::Validation(
                "quote number is required".to_string(),
            ));
        }
        line_item::validate_unique_ids(&self.items)?;

        Ok(Quote {
            id,
            quote_number: self.quote_number,
            client_id,
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            items: self.items,
            status: self.status,
            notes: self.notes.filter(|notes| !notes.trim().is_empty()),
        })
    }
}

impl LineItems for QuoteDraft {
    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }
}
