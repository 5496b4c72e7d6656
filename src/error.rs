//! Error types for the polyalpha library.

use thiserror::Error;

/// Errors produced by the polyalpha engine.
///
/// All conditions are detected eagerly at the start of an operation;
/// no variant is raised after output has been partially produced.
///
/// Decrypting with the wrong key is deliberately *not* an error: the
/// wire format carries no authentication tag, so a mismatched key
/// silently yields garbage plaintext of the expected length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is empty, or not a whole number of words wide.
    #[error("Key must be at least 1 byte and a whole number of words")]
    InvalidKey,

    /// The engine options are unsupported (IV length outside the
    /// permitted set, widening combined with a wide word size, or an
    /// injected IV of the wrong length).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The ciphertext frame is structurally invalid: shorter than the
    /// minimum frame, an impossible padding count, or a body that does
    /// not split into whole words.
    #[error("Malformed ciphertext ({context}): expected {expected}, found {actual}")]
    MalformedCiphertext {
        /// Which structural check failed.
        context: &'static str,
        /// The value the frame needed to satisfy.
        expected: usize,
        /// The value actually found.
        actual: usize,
    },
}

/// Convenience `Result` alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
