//! Core business logic for Factura.
//!
//! This crate contains pure business logic with ZERO storage or IO dependencies.
//! All domain types, lifecycle rules, and calculations live here.
//!
//! # Modules
//!
//! - `document` - Quotes, invoices, line items and their statuses
//! - `totals` - Subtotal, tax and grand total computation
//! - `numbering` - Yearly sequence numbers (`DEV-2024-007`)
//! - `payment` - Payments and invoice reconciliation
//! - `lifecycle` - Creation, conversion and archiving state machines
//! - `catalog` - Clients, products and company settings
//! - `reports` - Dashboard, client account and quote expiry views

pub mod catalog;
pub mod document;
pub mod lifecycle;
pub mod numbering;
pub mod payment;
pub mod reports;
pub mod totals;
