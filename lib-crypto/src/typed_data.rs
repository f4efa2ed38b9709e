//! Structured, domain-separated message digests (EIP-712)
//!
//! A digest is `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)`. The
//! domain separator binds every signature to one deployment, so the same
//! signed struct never verifies against a contract with a different name,
//! version, chain id or address.

use lib_types::Address;
use serde::{Deserialize, Serialize};

use crate::hashing::{keccak256, keccak256_multiple};

/// Canonical type string of the domain struct
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Prefix of the final digest preimage
const DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];

/// Signing domain of one deployed contract instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// `hashStruct(domain)`
    pub fn separator(&self) -> [u8; 32] {
        keccak256_multiple(&[
            &type_hash(EIP712_DOMAIN_TYPE),
            &hash_string(&self.name),
            &hash_string(&self.version),
            &u64_word(self.chain_id),
            &self.verifying_contract.to_word(),
        ])
    }
}

/// A struct that can be hashed under EIP-712 rules
pub trait TypedStruct {
    /// The canonical type string, e.g. `Mail(address from,string contents)`
    fn type_string() -> &'static str;

    /// Concatenated 32-byte words of the encoded members, in declaration order
    fn encode_data(&self) -> Vec<[u8; 32]>;

    /// `keccak256(typeHash ‖ encodeData(s))`
    fn struct_hash(&self) -> [u8; 32] {
        let type_hash = type_hash(Self::type_string());
        let words = self.encode_data();
        let mut segments: Vec<&[u8]> = Vec::with_capacity(words.len() + 1);
        segments.push(&type_hash);
        segments.extend(words.iter().map(|w| w.as_slice()));
        keccak256_multiple(&segments)
    }
}

/// Final digest a signer signs for `value` under `domain`
pub fn typed_data_digest<T: TypedStruct>(domain: &Eip712Domain, value: &T) -> [u8; 32] {
    digest_from_parts(&domain.separator(), &value.struct_hash())
}

/// Final digest from a precomputed domain separator and struct hash
pub fn digest_from_parts(domain_separator: &[u8; 32], struct_hash: &[u8; 32]) -> [u8; 32] {
    keccak256_multiple(&[&DIGEST_PREFIX, domain_separator, struct_hash])
}

/// Hash of a canonical type string
pub fn type_hash(type_string: &str) -> [u8; 32] {
    keccak256(type_string.as_bytes())
}

/// Dynamic `string` members are encoded as the hash of their UTF-8 bytes
pub fn hash_string(value: &str) -> [u8; 32] {
    keccak256(value.as_bytes())
}

/// `uint256` encoding of a `u64`
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}
