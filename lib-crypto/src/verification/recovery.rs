//! secp256k1 public key recovery from a prehashed digest
//!
//! Signatures are 65 bytes `r ‖ s ‖ v`. `v` may be the raw recovery id
//! (0 or 1) or the Ethereum-style 27/28. High-s signatures are rejected.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use lib_types::Address;
use tracing::debug;

use crate::errors::{CryptoError, CryptoResult};
use crate::hashing::keccak256;

/// Length of a recoverable signature in bytes
pub const SIGNATURE_LEN: usize = 65;

/// Recover the address that produced `signature` over `digest`
///
/// Never compares against an expected signer; that decision belongs to the
/// caller. Any malformed input yields an error.
pub fn recover_signer(digest: &[u8; 32], signature: &[u8]) -> CryptoResult<Address> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CryptoError::SignatureLength {
            expected: SIGNATURE_LEN,
            got: signature.len(),
        });
    }

    let v = signature[64];
    let recovery_byte = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => return Err(CryptoError::InvalidRecoveryId(other)),
    };
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or(CryptoError::InvalidRecoveryId(v))?;

    let sig = Signature::try_from(&signature[..64])
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    if sig.normalize_s().is_some() {
        return Err(CryptoError::InvalidSignature(
            "non-canonical signature (high s)".to_string(),
        ));
    }

    let verifying_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;

    let address = address_from_verifying_key(&verifying_key);
    debug!(signer = %address, "recovered signer");
    Ok(address)
}

/// Address = last 20 bytes of keccak256 of the uncompressed public key
/// without its 0x04 tag
pub fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::SigningKeyPair;

    fn test_key() -> SigningKeyPair {
        SigningKeyPair::from_bytes(&[0x11; 32]).unwrap()
    }

    #[test]
    fn test_recover_roundtrip() {
        let key = test_key();
        let digest = keccak256(b"issue #5");
        let signature = key.sign_digest(&digest).unwrap();

        assert_eq!(recover_signer(&digest, &signature).unwrap(), key.address());
    }

    #[test]
    fn test_recover_accepts_ethereum_v() {
        let key = test_key();
        let digest = keccak256(b"issue #6");
        let mut signature = key.sign_digest(&digest).unwrap();
        assert!(signature[64] >= 27);
        signature[64] -= 27;

        assert_eq!(recover_signer(&digest, &signature).unwrap(), key.address());
    }

    #[test]
    fn test_different_digest_recovers_different_address() {
        let key = test_key();
        let signature = key.sign_digest(&keccak256(b"a")).unwrap();

        // Recovery succeeds but yields an unrelated address
        match recover_signer(&keccak256(b"b"), &signature) {
            Ok(addr) => assert_ne!(addr, key.address()),
            Err(_) => {}
        }
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let result = recover_signer(&[0u8; 32], &[0u8; 64]);
        assert_eq!(
            result,
            Err(CryptoError::SignatureLength { expected: 65, got: 64 })
        );
    }

    #[test]
    fn test_bad_recovery_byte_is_malformed() {
        let key = test_key();
        let digest = keccak256(b"x");
        let mut signature = key.sign_digest(&digest).unwrap();
        signature[64] = 29;
        assert_eq!(
            recover_signer(&digest, &signature),
            Err(CryptoError::InvalidRecoveryId(29))
        );
    }

    #[test]
    fn test_zero_signature_is_malformed() {
        let result = recover_signer(&[0u8; 32], &[0u8; 65]);
        assert!(matches!(result, Err(CryptoError::InvalidSignature(_))));
    }

    #[test]
    fn test_high_s_is_rejected() {
        let key = test_key();
        let digest = keccak256(b"malleable");
        let signature = key.sign_digest(&digest).unwrap();

        // Flip s to n - s and the parity bit; same point, non-canonical form
        let sig = Signature::try_from(&signature[..64]).unwrap();
        let (r, s) = sig.split_scalars();
        let high_s = -*s;
        let flipped = Signature::from_scalars(r.to_bytes(), high_s.to_bytes()).unwrap();
        let mut malleated = [0u8; 65];
        malleated[..64].copy_from_slice(&flipped.to_bytes());
        malleated[64] = if signature[64] == 27 { 28 } else { 27 };

        assert!(matches!(
            recover_signer(&digest, &malleated),
            Err(CryptoError::InvalidSignature(_))
        ));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn prop_sign_then_recover_yields_signer(digest in any::<[u8; 32]>()) {
                let key = test_key();
                let signature = key.sign_digest(&digest).unwrap();
                prop_assert_eq!(recover_signer(&digest, &signature).unwrap(), key.address());
            }
        }
    }
}
