//! Document lifecycle management.
//!
//! This module implements the quote and invoice state machines: creating
//! draft skeletons, validating edited statuses, archiving quotes, and
//! converting accepted quotes into invoices.
//!
//! # Modules
//!
//! - `types` - Lifecycle outcomes (conversion, archive)
//! - `service` - State transition logic

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::{LifecycleService, due_date_from};
pub use types::{ArchiveOutcome, Conversion};
