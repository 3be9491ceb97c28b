//! Read-only views over quotes, invoices and payments.
//!
//! This module provides pure functions for the summaries shown to the user:
//! - Dashboard (client count, pending quotes, unpaid invoices, revenue, recent quotes and invoices)
//! - Client account (billed, paid, outstanding)
//! - Quote listing and expiry indicator

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
