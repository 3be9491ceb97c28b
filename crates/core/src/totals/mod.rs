//! Monetary calculator for line-item documents.
//!
//! Pure functions with no rounding: formatting is the caller's concern.

pub mod calculator;

#[cfg(test)]
mod calculator_props;

pub use calculator::{DocumentTotals, compute_totals, grand_total};
