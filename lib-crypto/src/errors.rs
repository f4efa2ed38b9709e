//! Cryptography errors

use thiserror::Error;

/// Error during key handling or signer recovery
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Signature must be {expected} bytes, got {got}")]
    SignatureLength { expected: usize, got: usize },

    #[error("Invalid recovery byte: {0}")]
    InvalidRecoveryId(u8),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// Result type for cryptography operations
pub type CryptoResult<T> = Result<T, CryptoError>;
