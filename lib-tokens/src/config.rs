//! Contract configuration loader.
//!
//! ```toml
//! name = "Lazy Collection"
//! symbol = "LAZY"
//! principal = "0x…"
//!
//! [domain]
//! name = "LazyVoucher"
//! version = "1"
//! chain_id = 31337
//! verifying_contract = "0x…"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use lib_crypto::Eip712Domain;
use lib_types::Address;

use crate::errors::{IssuanceError, IssuanceResult};

/// Default signing domain name
pub const DEFAULT_DOMAIN_NAME: &str = "LazyVoucher";

/// Default signing domain version
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssuerConfig {
    /// Collection name
    #[serde(default = "default_collection_name")]
    pub name: String,
    /// Collection symbol
    #[serde(default = "default_collection_symbol")]
    pub symbol: String,
    /// The single privileged identity, fixed for the contract's lifetime
    pub principal: Address,
    pub domain: DomainConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DomainConfig {
    #[serde(default = "default_domain_name")]
    pub name: String,
    #[serde(default = "default_domain_version")]
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl DomainConfig {
    pub fn to_domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.verifying_contract,
        )
    }
}

fn default_collection_name() -> String {
    "Lazy Collection".to_string()
}

fn default_collection_symbol() -> String {
    "LAZY".to_string()
}

fn default_domain_name() -> String {
    DEFAULT_DOMAIN_NAME.to_string()
}

fn default_domain_version() -> String {
    DEFAULT_DOMAIN_VERSION.to_string()
}

/// Parse a TOML document into a config
pub fn parse_config(raw: &str) -> IssuanceResult<IssuerConfig> {
    let config: IssuerConfig = toml::from_str(raw)
        .map_err(|e| IssuanceError::Config(format!("Invalid issuer config: {}", e)))?;
    if config.principal.is_zero() {
        return Err(IssuanceError::Config(
            "principal must not be the zero address".to_string(),
        ));
    }
    Ok(config)
}

/// Read and parse a config file
pub fn load_config(path: &Path) -> IssuanceResult<IssuerConfig> {
    if !path.exists() {
        return Err(IssuanceError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| IssuanceError::Config(format!("Failed to read config: {}", e)))?;

    let config = parse_config(&raw)?;
    tracing::info!(path = %path.display(), principal = %config.principal, "loaded issuer config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
name = "Test Collection"
symbol = "TST"
principal = "0x1111111111111111111111111111111111111111"

[domain]
name = "TestVoucher"
version = "2"
chain_id = 5
verifying_contract = "0x2222222222222222222222222222222222222222"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL).unwrap();
        assert_eq!(config.name, "Test Collection");
        assert_eq!(config.symbol, "TST");
        assert_eq!(config.principal, Address::new([0x11; 20]));
        assert_eq!(config.domain.name, "TestVoucher");
        assert_eq!(config.domain.version, "2");
        assert_eq!(config.domain.chain_id, 5);
        assert_eq!(config.domain.verifying_contract, Address::new([0x22; 20]));
    }

    #[test]
    fn test_defaults_apply() {
        let raw = r#"
principal = "0x1111111111111111111111111111111111111111"

[domain]
chain_id = 1
verifying_contract = "0x2222222222222222222222222222222222222222"
"#;
        let config = parse_config(raw).unwrap();
        assert_eq!(config.symbol, "LAZY");
        assert_eq!(config.domain.name, DEFAULT_DOMAIN_NAME);
        assert_eq!(config.domain.version, DEFAULT_DOMAIN_VERSION);
    }

    #[test]
    fn test_zero_principal_rejected() {
        let raw = FULL.replace(
            "0x1111111111111111111111111111111111111111",
            "0x0000000000000000000000000000000000000000",
        );
        assert!(matches!(parse_config(&raw), Err(IssuanceError::Config(_))));
    }

    #[test]
    fn test_bad_address_rejected() {
        let raw = FULL.replace("0x1111111111111111111111111111111111111111", "0x11");
        assert!(matches!(parse_config(&raw), Err(IssuanceError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/issuer.toml"));
        assert!(matches!(result, Err(IssuanceError::Config(msg)) if msg.contains("not found")));
    }
}
