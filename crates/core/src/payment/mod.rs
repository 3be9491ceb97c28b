//! Payments and invoice reconciliation.
//!
//! # Modules
//!
//! - `types` - Payment records and methods
//! - `reconciler` - Paid-to-date, balance and derived invoice status

pub mod reconciler;
pub mod types;

#[cfg(test)]
mod reconciler_props;

pub use reconciler::{PaymentOutcome, Reconciliation, ReconciliationService};
pub use types::{NewPayment, Payment, PaymentMethod};
