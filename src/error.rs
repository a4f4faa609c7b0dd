use thiserror::Error;

/// A malformed armored run found by [`crate::armor::try_unpin`].
///
/// `offset` is the 0-based byte offset of the run's open marker in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArmorError {
    /// An open marker with no well-formed close marker after it.
    #[error("unterminated armored run at byte {offset}")]
    Unterminated { offset: usize },

    /// The payload is not an even-length run of hex digits.
    #[error("armored run at byte {offset} has a payload that is not hex-encoded bytes")]
    InvalidHex { offset: usize },

    /// The payload decodes to bytes that are not UTF-8.
    #[error("armored run at byte {offset} does not decode to UTF-8")]
    InvalidUtf8 { offset: usize },
}

impl ArmorError {
    pub fn offset(&self) -> usize {
        match self {
            ArmorError::Unterminated { offset }
            | ArmorError::InvalidHex { offset }
            | ArmorError::InvalidUtf8 { offset } => *offset,
        }
    }
}

/// A `serde_json::Value` that cannot become a JSON literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// Array-valued entries have no literal form.
    #[error("array value for key '{key}' is not supported in a JSON literal")]
    UnsupportedArray { key: String },

    /// The top-level value was not an object.
    #[error("a JSON literal must be built from an object")]
    NotAnObject,
}
