//! Error types for Markdown escaping.

/// Errors that can occur while configuring Markdown escaping.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Start and end marker lists must pair up one to one.
    #[error("delimiter lists differ in length: {starts} start marker(s), {ends} end marker(s)")]
    MismatchedDelimiters {
        /// Number of start markers given.
        starts: usize,
        /// Number of end markers given.
        ends: usize,
    },

    /// A delimiter marker was empty.
    #[error("delimiter markers must not be empty (start: {start:?}, end: {end:?})")]
    EmptyDelimiter {
        /// Start marker as given.
        start: String,
        /// End marker as given.
        end: String,
    },
}
