//! Business documents: quotes, invoices and their line items.
//!
//! # Modules
//!
//! - `status` - Quote/invoice status enums and record kinds
//! - `line_item` - Priced rows and the `LineItems` editing/totals trait
//! - `quote` - Quote and its unsaved draft form
//! - `invoice` - Invoice and its unsaved draft form
//! - `error` - Document error types

pub mod error;
pub mod invoice;
pub mod line_item;
pub mod quote;
pub mod status;

pub use error::DocumentError;
pub use invoice::{Invoice, InvoiceDraft};
pub use line_item::{LineItem, LineItems};
pub use quote::{Quote, QuoteDraft};
pub use status::{DocumentKind, InvoiceStatus, QuoteStatus, RecordKind};

use factura_shared::types::{InvoiceId, QuoteId};

/// A saved document of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A saved quote.
    Quote(Quote),
    /// A saved invoice.
    Invoice(Invoice),
}

impl Document {
    /// Returns which kind of document this is.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Quote(_) => DocumentKind::Quote,
            Self::Invoice(_) => DocumentKind::Invoice,
        }
    }

    /// Returns the human-readable document number.
    #[must_use]
    pub fn number(&self) -> &str {
        match self {
            Self::Quote(quote) => &quote.quote_number,
            Self::Invoice(invoice) => &invoice.invoice_number,
        }
    }
}

/// A document being edited, saved or not yet.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentDraft {
    /// A quote draft.
    Quote(QuoteDraft),
    /// An invoice draft.
    Invoice(InvoiceDraft),
}

impl DocumentDraft {
    /// Returns which kind of document this draft will become.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Quote(_) => DocumentKind::Quote,
            Self::Invoice(_) => DocumentKind::Invoice,
        }
    }
}

/// Reference to a saved document by kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRef {
    /// A quote id.
    Quote(QuoteId),
    /// An invoice id.
    Invoice(InvoiceId),
}

impl DocumentRef {
    /// Returns which kind of document is referenced.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Quote(_) => DocumentKind::Quote,
            Self::Invoice(_) => DocumentKind::Invoice,
        }
    }
}
