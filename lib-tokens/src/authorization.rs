//! Authorization verifier
//!
//! A voucher is the signed tuple {price, tokenId, uri}. It is never stored:
//! every check rebuilds the typed-data digest from the caller-supplied terms
//! and recovers whoever signed it. There is no registry of used signatures,
//! so a voucher stays redeemable until the identifier it names stops being
//! available.

use serde::{Deserialize, Serialize};

use lib_crypto::typed_data::hash_string;
use lib_crypto::{
    recover_signer, typed_data_digest, CryptoResult, Eip712Domain, SigningKeyPair, TypedStruct,
    SIGNATURE_LEN,
};
use lib_types::{amount_to_word, Address, Amount, TokenId};

/// Canonical type string of the voucher struct
pub const VOUCHER_TYPE: &str = "IssuanceVoucher(uint256 price,uint256 tokenId,string uri)";

/// Authorization terms bound into a principal's signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceVoucher {
    pub price: Amount,
    pub token_id: TokenId,
    pub uri: String,
}

impl IssuanceVoucher {
    pub fn new(price: Amount, token_id: TokenId, uri: impl Into<String>) -> Self {
        Self {
            price,
            token_id,
            uri: uri.into(),
        }
    }
}

impl TypedStruct for IssuanceVoucher {
    fn type_string() -> &'static str {
        VOUCHER_TYPE
    }

    fn encode_data(&self) -> Vec<[u8; 32]> {
        vec![
            amount_to_word(self.price),
            self.token_id.to_word(),
            hash_string(&self.uri),
        ]
    }
}

/// Stateless signer recovery bound to one signing domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationVerifier {
    domain: Eip712Domain,
}

impl AuthorizationVerifier {
    pub fn new(domain: Eip712Domain) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Digest a principal signs for `voucher` on this deployment
    pub fn digest(&self, voucher: &IssuanceVoucher) -> [u8; 32] {
        typed_data_digest(&self.domain, voucher)
    }

    /// Recover the signer of the terms. A wrong signer is not an error here;
    /// only malformed signatures are.
    pub fn recover_signer(
        &self,
        price: Amount,
        token_id: TokenId,
        uri: &str,
        signature: &[u8],
    ) -> CryptoResult<Address> {
        let voucher = IssuanceVoucher::new(price, token_id, uri);
        recover_signer(&self.digest(&voucher), signature)
    }

    /// Sign a voucher with the principal's key (off-chain tooling)
    pub fn sign(
        &self,
        key: &SigningKeyPair,
        voucher: &IssuanceVoucher,
    ) -> CryptoResult<[u8; SIGNATURE_LEN]> {
        key.sign_digest(&self.digest(voucher))
    }
}
