//! Sequence number generator.

use std::fmt;

/// A parsed document number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNumber {
    /// Prefix distinguishing the document kind (`DEV`, `FAC`).
    pub prefix: String,
    /// Calendar year the number belongs to.
    pub year: i32,
    /// Position within the year, starting at 1.
    pub sequence: u64,
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Width 3 is a minimum: the 1000th number of a year renders with 4 digits.
        write!(f, "{}-{}-{:03}", self.prefix, self.year, self.sequence)
    }
}

/// Returns the numeric suffix of a document number (text after the last `-`),
/// or `None` when it is not a number.
#[must_use]
pub fn try_parse_sequence(number: &str) -> Option<u64> {
    number
        .rsplit('-')
        .next()
        .and_then(|suffix| suffix.trim().parse::<u64>().ok())
}

/// Returns the numeric suffix of a document number.
///
/// A malformed suffix counts as 0 so it never blocks numbering.
#[must_use]
pub fn parse_sequence(number: &str) -> u64 {
    try_parse_sequence(number).unwrap_or(0)
}

/// Derives the next number for `prefix` in `year` from existing numbers.
///
/// Only numbers starting with exactly `{prefix}-{year}-` are considered.
/// With none, the result is `{prefix}-{year}-001`; otherwise the highest
/// suffix plus one.
pub fn next_number<'a, I>(prefix: &str, existing: I, year: i32) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let year_prefix = format!("{prefix}-{year}-");

    let max = existing
        .into_iter()
        .filter(|number| number.starts_with(&year_prefix))
        .map(parse_sequence)
        .max()
        .unwrap_or(0);

    match max.checked_add(1) {
        Some(sequence) => SequenceNumber {
            prefix: prefix.to_string(),
            year,
            sequence,
        }
        .to_string(),
        // Past u64::MAX the suffix keeps growing instead of repeating.
        None => format!("{year_prefix}{}", u128::from(max) + 1),
    }
}
