//! Issuance Cryptography Module
//!
//! Keccak-256 hashing, EIP-712 typed-data digests and secp256k1 signer
//! recovery. Everything here is pure: no state, no I/O.

pub mod errors;
pub mod hashing;
pub mod keypair;
pub mod typed_data;
pub mod verification;

pub use errors::{CryptoError, CryptoResult};
pub use hashing::{keccak256, keccak256_multiple};
pub use keypair::SigningKeyPair;
pub use typed_data::{typed_data_digest, Eip712Domain, TypedStruct};
pub use verification::{recover_signer, SIGNATURE_LEN};
