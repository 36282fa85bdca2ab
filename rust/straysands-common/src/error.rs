use thiserror::Error;

/// Errors raised while decoding identifiers from their textual or raw form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StraySandsCommonError {
    /// The input did not start with the sigil expected for the identifier
    #[error("Expected identifier to start with '{expected}'")]
    MissingSigil {
        /// The sigil the identifier must start with
        expected: char,
    },

    /// The input was not valid base58
    #[error("Invalid base58 encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded bytes had the wrong length for the identifier
    #[error("Incorrect length (expected {expected}, got {actual})")]
    InvalidLength {
        /// Number of bytes the identifier requires
        expected: usize,
        /// Number of bytes that were provided
        actual: usize,
    },
}
