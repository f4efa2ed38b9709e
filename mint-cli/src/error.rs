//! Structured error types for the mint CLI

use lib_crypto::CryptoError;
use lib_tokens::IssuanceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Signing domain incomplete: missing {0}")]
    IncompleteDomain(&'static str),

    #[error("Failed to load snapshot from {path}: {reason}")]
    SnapshotLoadFailed { path: String, reason: String },

    #[error("Cryptographic operation failed: {0}")]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Issuance(#[from] IssuanceError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
