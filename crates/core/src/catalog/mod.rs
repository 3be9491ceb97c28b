//! Clients, products and company settings.
//!
//! Products only pre-fill line items; documents never keep a reference to them.
//! Clients are referenced by id and may be deleted while still referenced.

pub mod client;
pub mod company;
pub mod product;

pub use client::{Client, ClientDraft, ImportSummary, merge_imported_clients};
pub use company::{CompanyInfo, UserRole};
pub use product::{Product, ProductDraft};
