//! Error types for the solseed library

use thiserror::Error;

/// Custom error type for solseed operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Entropy source unavailable: {0}")]
    EntropySource(String),

    #[error("Mnemonic checksum mismatch: {0}")]
    Checksum(String),

    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Invalid seed: expected {expected} bytes, got {actual}")]
    InvalidSeed { expected: usize, actual: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Secret key does not match its public key")]
    KeyMismatch,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the caller can recover by asking the user for new input.
    ///
    /// `EntropySource` is fatal for the session; `InvalidPath`, `InvalidSeed`
    /// and `KeyMismatch` indicate a defect in how the core was driven and must
    /// abort the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Checksum(_) | Self::Mnemonic(_) | Self::Encoding(_) | Self::Config(_)
        )
    }
}

/// Result type for solseed operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::Checksum("bad".into()).is_recoverable());
        assert!(Error::Mnemonic("13 words".into()).is_recoverable());
        assert!(!Error::EntropySource("no rng".into()).is_recoverable());
        assert!(!Error::InvalidPath("m".into()).is_recoverable());
        assert!(!Error::InvalidSeed { expected: 32, actual: 31 }.is_recoverable());
        assert!(!Error::KeyMismatch.is_recoverable());
    }

    #[test]
    fn test_invalid_seed_message() {
        let err = Error::InvalidSeed { expected: 32, actual: 16 };
        assert_eq!(err.to_string(), "Invalid seed: expected 32 bytes, got 16");
    }
}
