//! Issuance Contract Errors

use lib_crypto::CryptoError;
use lib_types::{Address, Amount, TokenId};
use thiserror::Error;

/// Broad class of a rejection, for callers that branch on the kind of
/// failure rather than on the exact reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Caller is not the principal
    Authorization,
    /// Identifier is claimed, revoked or below the floor
    Availability,
    /// Signature is malformed or not from the principal
    Signature,
    /// Malformed input data (empty pointer, zero recipient, stray value)
    Data,
    /// Payout of custody funds failed
    Transfer,
    /// Floor raise with a non-increasing value
    Monotonicity,
    /// Caller does not hold the identifier, or nobody does
    Ownership,
    /// Counter overflow or underflow
    Arithmetic,
    /// Configuration or persisted state could not be used
    State,
}

/// Error during issuance operations
///
/// Every variant is a clean rejection: the operation that produced it made
/// no state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    #[error("Unauthorized: {caller} is not the principal")]
    Unauthorized { caller: Address },

    #[error("Token {0} already claimed")]
    AlreadyClaimed(TokenId),

    #[error("Token {id} is below the floor ({floor})")]
    BelowFloor { id: TokenId, floor: u64 },

    #[error("Token {0} has been revoked")]
    Revoked(TokenId),

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    #[error("Signature not from principal: expected {expected}, recovered {recovered}")]
    SignerMismatch { expected: Address, recovered: Address },

    #[error("Metadata pointer must not be empty")]
    EmptyMetadataPointer,

    #[error("Recipient must not be the zero address")]
    ZeroRecipient,

    #[error("Operation does not accept value (attached {value})")]
    NonPayable { value: Amount },

    #[error("Value transfer failed: {0}")]
    TransferFailed(String),

    #[error("Floor must strictly increase: current {current}, requested {requested}")]
    FloorNotIncreasing { current: u64, requested: u64 },

    #[error("Caller {caller} does not hold token {id}")]
    NotHolder { caller: Address, id: TokenId },

    #[error("Token {0} is not claimed")]
    NotClaimed(TokenId),

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Arithmetic underflow")]
    Underflow,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invariant violated: {0}")]
    InvariantViolated(String),
}

impl IssuanceError {
    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        match self {
            IssuanceError::Unauthorized { .. } => ErrorClass::Authorization,
            IssuanceError::AlreadyClaimed(_)
            | IssuanceError::BelowFloor { .. }
            | IssuanceError::Revoked(_) => ErrorClass::Availability,
            IssuanceError::MalformedSignature(_) | IssuanceError::SignerMismatch { .. } => {
                ErrorClass::Signature
            }
            IssuanceError::EmptyMetadataPointer
            | IssuanceError::ZeroRecipient
            | IssuanceError::NonPayable { .. } => ErrorClass::Data,
            IssuanceError::TransferFailed(_) => ErrorClass::Transfer,
            IssuanceError::FloorNotIncreasing { .. } => ErrorClass::Monotonicity,
            IssuanceError::NotHolder { .. } | IssuanceError::NotClaimed(_) => ErrorClass::Ownership,
            IssuanceError::Overflow | IssuanceError::Underflow => ErrorClass::Arithmetic,
            IssuanceError::Config(_) | IssuanceError::InvariantViolated(_) => ErrorClass::State,
        }
    }
}

impl From<CryptoError> for IssuanceError {
    fn from(err: CryptoError) -> Self {
        IssuanceError::MalformedSignature(err.to_string())
    }
}

/// Result type for issuance operations
pub type IssuanceResult<T> = Result<T, IssuanceError>;
