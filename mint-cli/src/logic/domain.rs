//! Signing domain resolution
//!
//! Command-line overrides win over the config file; name and version fall
//! back to the contract defaults, chain id and verifying contract must come
//! from one of the two.

use lib_crypto::Eip712Domain;
use lib_tokens::config::{DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION};
use lib_tokens::DomainConfig;
use lib_types::Address;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainOverrides {
    pub name: Option<String>,
    pub version: Option<String>,
    pub chain_id: Option<u64>,
    pub verifying_contract: Option<Address>,
}

pub fn resolve_domain(
    config: Option<&DomainConfig>,
    overrides: &DomainOverrides,
) -> CliResult<Eip712Domain> {
    let name = overrides
        .name
        .clone()
        .or_else(|| config.map(|c| c.name.clone()))
        .unwrap_or_else(|| DEFAULT_DOMAIN_NAME.to_string());
    let version = overrides
        .version
        .clone()
        .or_else(|| config.map(|c| c.version.clone()))
        .unwrap_or_else(|| DEFAULT_DOMAIN_VERSION.to_string());
    let chain_id = overrides
        .chain_id
        .or_else(|| config.map(|c| c.chain_id))
        .ok_or(CliError::IncompleteDomain("chain id"))?;
    let verifying_contract = overrides
        .verifying_contract
        .or_else(|| config.map(|c| c.verifying_contract))
        .ok_or(CliError::IncompleteDomain("verifying contract"))?;

    Ok(Eip712Domain::new(name, version, chain_id, verifying_contract))
}
