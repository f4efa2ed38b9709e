//! secp256k1 signing keys for the issuing principal
//!
//! The contract itself never signs; these keys live with the principal's
//! off-chain tooling, which hands signed vouchers to callers.

use k256::ecdsa::SigningKey;
use lib_types::Address;
use rand::rngs::OsRng;
use std::fmt;

use crate::errors::{CryptoError, CryptoResult};
use crate::verification::{address_from_verifying_key, SIGNATURE_LEN};

/// Offset added to the recovery id in the trailing `v` byte
const ETHEREUM_V_OFFSET: u8 = 27;

/// A secp256k1 key pair that signs prehashed digests
#[derive(Clone)]
pub struct SigningKeyPair {
    signing_key: SigningKey,
}

impl SigningKeyPair {
    /// Generate a fresh key from the operating system RNG
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Load a key from 32 raw secret bytes
    pub fn from_bytes(secret: &[u8]) -> CryptoResult<Self> {
        let signing_key = SigningKey::from_slice(secret)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// Load a key from hex, with or without a `0x` prefix
    pub fn from_hex(secret: &str) -> CryptoResult<Self> {
        let trimmed = secret.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits)
            .map_err(|e| CryptoError::InvalidPrivateKey(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Hex-encoded secret, for export by the key generation command only
    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Address controlled by this key
    pub fn address(&self) -> Address {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest, returning `r ‖ s ‖ v` with `v` in {27, 28}
    pub fn sign_digest(&self, digest: &[u8; 32]) -> CryptoResult<[u8; SIGNATURE_LEN]> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte() + ETHEREUM_V_OFFSET;
        Ok(out)
    }
}

impl fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
