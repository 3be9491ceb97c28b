//! Document status types.
//!
//! Quote valid transitions:
//! - Draft → Sent
//! - Sent → Accepted | Rejected
//! - Accepted | Rejected → Archived (terminal)
//!
//! Invoice valid transitions:
//! - Draft → Sent
//! - Sent → PartiallyPaid → Paid (payment driven)
//! - any → Overdue (manual)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quote status.
///
/// Deserialization also accepts the French labels written by earlier
/// versions of the application ("Brouillon", "Envoyé", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Quote is being prepared.
    #[serde(alias = "Brouillon")]
    Draft,
    /// Quote has been sent to the client.
    #[serde(alias = "Envoyé")]
    Sent,
    /// Client accepted the quote.
    #[serde(alias = "Accepté")]
    Accepted,
    /// Client rejected the quote.
    #[serde(alias = "Rejeté")]
    Rejected,
    /// Quote is archived (terminal).
    #[serde(alias = "Archivé")]
    Archived,
}

impl QuoteStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Sent,
        Self::Accepted,
        Self::Rejected,
        Self::Archived,
    ];

    /// Statuses selectable from the edit form. Archived is only reachable
    /// through the explicit archive operation.
    pub const EDITABLE: [Self; 4] = [Self::Draft, Self::Sent, Self::Accepted, Self::Rejected];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Archived => "archived",
        }
    }

    /// Returns the display label shown on printed documents.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Brouillon",
            Self::Sent => "Envoyé",
            Self::Accepted => "Accepté",
            Self::Rejected => "Rejeté",
            Self::Archived => "Archivé",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Returns true if the explicit archive operation is permitted.
    #[must_use]
    pub fn can_archive(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Returns true if the UI should offer conversion to an invoice.
    #[must_use]
    pub fn can_convert(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Returns true if the quote is still awaiting a client decision.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Invoice status.
///
/// `Paid` and `PartiallyPaid` are derived from recorded payments.
/// `Overdue` is only ever set by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Invoice is being prepared.
    #[serde(alias = "Brouillon")]
    Draft,
    /// Invoice has been sent and nothing is paid yet.
    #[serde(alias = "Envoyé")]
    Sent,
    /// Some but not all of the total has been paid.
    #[serde(alias = "Partiellement payé")]
    PartiallyPaid,
    /// The total has been paid.
    #[serde(alias = "Payé")]
    Paid,
    /// Marked overdue by the user.
    #[serde(alias = "En retard")]
    Overdue,
}

impl InvoiceStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Sent,
        Self::PartiallyPaid,
        Self::Paid,
        Self::Overdue,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Returns the display label shown on printed documents.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Brouillon",
            Self::Sent => "Envoyé",
            Self::PartiallyPaid => "Partiellement payé",
            Self::Paid => "Payé",
            Self::Overdue => "En retard",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "partially_paid" => Some(Self::PartiallyPaid),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Returns true if this status can only come from payment reconciliation.
    #[must_use]
    pub fn is_payment_derived(&self) -> bool {
        matches!(self, Self::PartiallyPaid | Self::Paid)
    }

    /// Returns true if the invoice is awaiting payment (dashboard "unpaid" count).
    #[must_use]
    pub fn is_awaiting_payment(&self) -> bool {
        matches!(self, Self::Sent | Self::Overdue)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two kinds of business document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A quote.
    Quote,
    /// An invoice.
    Invoice,
}

impl DocumentKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Invoice => "invoice",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every kind of persisted record, used to report missing references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A client.
    Client,
    /// A catalog product.
    Product,
    /// A quote.
    Quote,
    /// An invoice.
    Invoice,
    /// A payment.
    Payment,
    /// A line item inside a document.
    LineItem,
}

impl RecordKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Product => "product",
            Self::Quote => "quote",
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::LineItem => "line item",
        }
    }
}

impl From<DocumentKind> for RecordKind {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Quote => Self::Quote,
            DocumentKind::Invoice => Self::Invoice,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
