//! Report data types.

use chrono::NaiveDate;
use factura_shared::types::ClientId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::{Invoice, Quote};

/// Number of documents shown in each of the dashboard's recent lists.
pub const RECENT_DOCUMENTS_LIMIT: usize = 5;

/// Expiry indicator shown next to an open quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteExpiry {
    /// The expiry date has passed.
    Expired,
    /// The quote expires within the warning window.
    ExpiringSoon,
}

impl QuoteExpiry {
    /// Returns the label shown in listings.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expired => "Expiré",
            Self::ExpiringSoon => "Expire bientôt",
        }
    }
}

/// Dashboard summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of stored clients.
    pub total_clients: usize,
    /// Quotes in `Sent`.
    pub pending_quotes: usize,
    /// Invoices in `Sent` or `Overdue`.
    pub unpaid_invoices: usize,
    /// Sum of the grand totals of `Paid` invoices.
    pub revenue: Decimal,
    /// Last quotes added, newest first.
    pub recent_quotes: Vec<Quote>,
    /// Last invoices added, newest first.
    pub recent_invoices: Vec<Invoice>,
}

/// Account view of one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAccountSummary {
    /// The client.
    pub client_id: ClientId,
    /// The client's quotes, newest first.
    pub quotes: Vec<Quote>,
    /// The client's invoices, newest first.
    pub invoices: Vec<Invoice>,
    /// Sum of invoice grand totals.
    pub total_billed: Decimal,
    /// Sum of payments against the client's invoices.
    pub total_paid: Decimal,
    /// Billed minus paid.
    pub outstanding: Decimal,
}
