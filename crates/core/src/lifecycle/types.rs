//! Lifecycle outcome types.

use crate::document::{Invoice, Quote};

/// Result of converting a quote into an invoice.
///
/// Both documents must be persisted: the new invoice is appended and the
/// quote replaced in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The source quote, now `Accepted`.
    pub quote: Quote,
    /// The new invoice, in `Draft`, pointing back at the quote.
    pub invoice: Invoice,
}

/// Result of the explicit archive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The quote moved to `Archived`.
    Archived,
    /// The quote was already archived; nothing changed.
    AlreadyArchived,
}

impl ArchiveOutcome {
    /// Returns true if the stored quote must be rewritten.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Archived)
    }
}
