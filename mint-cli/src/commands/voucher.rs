//! Voucher commands

use serde_json::json;
use std::path::Path;
use tracing::{debug, info};

use lib_crypto::Eip712Domain;
use lib_tokens::IssuanceVoucher;
use lib_types::TokenId;

use crate::argument_parsing::{OutputFormat, VoucherArgs};
use crate::commands::inspect::load_snapshot;
use crate::error::CliResult;
use crate::logic::{
    check_voucher, parse_key, parse_signature, recover_voucher_signer, sign_voucher,
    to_hex_prefixed, voucher_digest,
};
use crate::output::Output;

impl VoucherArgs {
    pub fn to_voucher(&self) -> IssuanceVoucher {
        IssuanceVoucher::new(self.price, TokenId::new(self.token_id), self.uri.clone())
    }
}

pub fn handle_digest(
    domain: &Eip712Domain,
    terms: &VoucherArgs,
    format: OutputFormat,
    output: &dyn Output,
) -> CliResult<()> {
    let digest = to_hex_prefixed(&voucher_digest(domain, &terms.to_voucher()));
    match format {
        OutputFormat::Json => output.print_json(&json!({
            "digest": digest,
            "domain_separator": to_hex_prefixed(&domain.separator()),
        })),
        OutputFormat::Text => output.print(&digest),
    }
}

pub fn handle_sign(
    domain: &Eip712Domain,
    terms: &VoucherArgs,
    raw_key: &str,
    format: OutputFormat,
    output: &dyn Output,
) -> CliResult<()> {
    let key = parse_key(raw_key)?;
    let signed = sign_voucher(domain, &key, terms.to_voucher())?;
    info!(token_id = terms.token_id, price = terms.price, signer = %signed.signer, "voucher signed");

    match format {
        OutputFormat::Json => output.print(&serde_json::to_string_pretty(&signed)?),
        OutputFormat::Text => {
            output.field("signer", &signed.signer.to_string())?;
            output.field("digest", &signed.digest)?;
            output.field("signature", &signed.signature)
        }
    }
}

pub fn handle_recover(
    domain: &Eip712Domain,
    terms: &VoucherArgs,
    raw_signature: &str,
    format: OutputFormat,
    output: &dyn Output,
) -> CliResult<()> {
    let signature = parse_signature(raw_signature)?;
    let signer = recover_voucher_signer(domain, &terms.to_voucher(), &signature)?;
    debug!(%signer, "recovered voucher signer");

    match format {
        OutputFormat::Json => output.print_json(&json!({ "signer": signer })),
        OutputFormat::Text => output.print(&signer.to_string()),
    }
}

/// Check uses the snapshot's own signing domain, not the command-line one
pub fn handle_check(
    terms: &VoucherArgs,
    raw_signature: &str,
    snapshot: &Path,
    format: OutputFormat,
    output: &dyn Output,
) -> CliResult<()> {
    let signature = parse_signature(raw_signature)?;
    let contract = load_snapshot(snapshot)?;
    let outcome = check_voucher(&contract, &terms.to_voucher(), &signature);

    match format {
        OutputFormat::Json => output.print(&serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => match (&outcome.class, &outcome.reason) {
            (Some(class), Some(reason)) => output.print(&format!("rejected ({}): {}", class, reason)),
            _ => output.print("issuable"),
        },
    }
}
