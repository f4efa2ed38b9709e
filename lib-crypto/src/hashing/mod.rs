//! Hashing module
//!
//! Keccak-256 is the only hash used on the signing path. It is the original
//! Keccak padding, not the finalized SHA3-256.

use sha3::{Digest, Keccak256};

/// Keccak-256 of a single buffer
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 over several segments, equivalent to hashing their concatenation
pub fn keccak256_multiple(segments: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for segment in segments {
        hasher.update(segment);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_known_vector() {
        let hash = keccak256(b"hello world");
        assert_eq!(
            hex::encode(hash),
            "47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad"
        );
    }

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_multiple_matches_concatenation() {
        let joined = keccak256(b"hello world");
        let split = keccak256_multiple(&[b"hello", b" ", b"world"]);
        assert_eq!(joined, split);
    }
}
