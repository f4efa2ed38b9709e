//! Voucher signing, recovery and checking

use serde::Serialize;

use lib_crypto::{Eip712Domain, SigningKeyPair, SIGNATURE_LEN};
use lib_tokens::{AuthorizationVerifier, IssuanceVoucher, IssuerContract};
use lib_types::{Address, Amount, TokenId};

use crate::error::{CliError, CliResult};

/// A signed voucher as handed to a redeemer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedVoucher {
    pub price: Amount,
    pub token_id: TokenId,
    pub uri: String,
    pub signer: Address,
    pub digest: String,
    pub signature: String,
}

/// Result of checking a voucher against contract state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub issuable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn to_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 32-byte secp256k1 secret from hex
pub fn parse_key(raw: &str) -> CliResult<SigningKeyPair> {
    SigningKeyPair::from_hex(raw).map_err(|e| CliError::InvalidKey(e.to_string()))
}

/// Parse a 65-byte `r ‖ s ‖ v` signature from hex
pub fn parse_signature(raw: &str) -> CliResult<Vec<u8>> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| CliError::InvalidSignature(e.to_string()))?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(CliError::InvalidSignature(format!(
            "expected {} bytes, got {}",
            SIGNATURE_LEN,
            bytes.len()
        )));
    }
    Ok(bytes)
}

pub fn voucher_digest(domain: &Eip712Domain, voucher: &IssuanceVoucher) -> [u8; 32] {
    AuthorizationVerifier::new(domain.clone()).digest(voucher)
}

pub fn sign_voucher(
    domain: &Eip712Domain,
    key: &SigningKeyPair,
    voucher: IssuanceVoucher,
) -> CliResult<SignedVoucher> {
    if voucher.uri.is_empty() {
        return Err(CliError::InvalidArgument(
            "metadata pointer must not be empty".to_string(),
        ));
    }
    let verifier = AuthorizationVerifier::new(domain.clone());
    let digest = verifier.digest(&voucher);
    let signature = verifier.sign(key, &voucher)?;

    Ok(SignedVoucher {
        price: voucher.price,
        token_id: voucher.token_id,
        uri: voucher.uri,
        signer: key.address(),
        digest: to_hex_prefixed(&digest),
        signature: to_hex_prefixed(&signature),
    })
}

pub fn recover_voucher_signer(
    domain: &Eip712Domain,
    voucher: &IssuanceVoucher,
    signature: &[u8],
) -> CliResult<Address> {
    let verifier = AuthorizationVerifier::new(domain.clone());
    Ok(verifier.recover_signer(voucher.price, voucher.token_id, &voucher.uri, signature)?)
}

/// Run the contract's read-only issuability check
pub fn check_voucher(
    contract: &IssuerContract,
    voucher: &IssuanceVoucher,
    signature: &[u8],
) -> CheckOutcome {
    match contract.check_issuable(voucher.price, voucher.token_id, &voucher.uri, signature) {
        Ok(()) => CheckOutcome {
            issuable: true,
            class: None,
            reason: None,
        },
        Err(err) => CheckOutcome {
            issuable: false,
            class: Some(format!("{:?}", err.class())),
            reason: Some(err.to_string()),
        },
    }
}
