//! Yearly document numbering.
//!
//! Numbers look like `{prefix}-{year}-{seq}` with a zero-padded 3-digit
//! sequence. Quotes and invoices use separate prefixes and so separate counters.

pub mod sequence;

pub use sequence::{SequenceNumber, next_number, parse_sequence, try_parse_sequence};
