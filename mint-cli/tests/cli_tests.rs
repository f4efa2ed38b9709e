//! Command dispatch through parsed arguments

use anyhow::Result;
use clap::Parser;
use std::fs;
use tempfile::TempDir;

use lib_crypto::SigningKeyPair;
use lib_tokens::{CallContext, IssuerConfig, IssuerContract};
use lib_types::{Address, TokenId};
use mint_cli::commands::dispatch;
use mint_cli::output::CapturedOutput;
use mint_cli::{CliError, MintCli};

const KEY: &str = "c85ef7d79691fe79573b1a7064c19c1a9819ebdbd1faaab1a8ec92344438aaf4";
const PRINCIPAL: &str = "0xcd2a3d9f938e13cd947ec05abc7fe734df8dd826";

const CONFIG: &str = r#"
principal = "0xcd2a3d9f938e13cd947ec05abc7fe734df8dd826"

[domain]
chain_id = 31337
verifying_contract = "0x5fbdb2315678afecb367f032d93f642f64180aa3"
"#;

fn run(args: &[&str]) -> Result<CapturedOutput, CliError> {
    let cli = MintCli::try_parse_from(args).expect("arguments parse");
    let output = CapturedOutput::new();
    dispatch(&cli, &output)?;
    Ok(output)
}

fn signature_from(output: &CapturedOutput) -> String {
    let line = output
        .messages()
        .into_iter()
        .find(|m| m.starts_with("signature:"))
        .expect("signature line");
    line.split_whitespace().last().unwrap().to_string()
}

#[test]
fn test_address_command() -> Result<()> {
    let output = run(&["mint-cli", "address", "--key", KEY])?;
    assert_eq!(output.messages(), vec![PRINCIPAL.to_string()]);
    Ok(())
}

#[test]
fn test_sign_and_recover_with_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = temp_dir.path().join("issuer.toml");
    fs::write(&config, CONFIG)?;
    let config = config.to_str().unwrap();

    let signed = run(&[
        "mint-cli", "--config", config, "sign", "--price", "100", "--token-id", "12", "--uri",
        "ipfs://12", "--key", KEY,
    ])?;
    assert!(signed.contains(PRINCIPAL));
    let signature = signature_from(&signed);

    let recovered = run(&[
        "mint-cli", "--config", config, "recover", "--price", "100", "--token-id", "12",
        "--uri", "ipfs://12", "--signature", &signature,
    ])?;
    assert_eq!(recovered.messages(), vec![PRINCIPAL.to_string()]);

    // Different chain id binds a different digest
    let other_chain = run(&[
        "mint-cli", "--config", config, "--chain-id", "1", "recover", "--price", "100",
        "--token-id", "12", "--uri", "ipfs://12", "--signature", &signature,
    ])?;
    assert_ne!(other_chain.messages(), vec![PRINCIPAL.to_string()]);
    Ok(())
}

#[test]
fn test_digest_requires_domain() {
    let err = run(&["mint-cli", "digest", "--token-id", "1", "--uri", "ipfs://1"]).unwrap_err();
    assert!(matches!(err, CliError::IncompleteDomain(_)));
}

#[test]
fn test_check_against_snapshot() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("issuer.toml");
    fs::write(&config_path, CONFIG)?;
    let config: IssuerConfig = lib_tokens::load_config(&config_path)?;
    let config_path = config_path.to_str().unwrap();

    let mut contract = IssuerContract::from_config(&config);
    let principal = CallContext::new(SigningKeyPair::from_hex(KEY)?.address());
    contract.issue_direct(&principal, Address::new([0x77; 20]), TokenId::new(1), "ipfs://1")?;
    let snapshot_path = temp_dir.path().join("snapshot.json");
    fs::write(&snapshot_path, contract.snapshot().to_json()?)?;
    let snapshot_path = snapshot_path.to_str().unwrap();

    let fresh = signature_from(&run(&[
        "mint-cli", "--config", config_path, "sign", "--token-id", "2", "--uri", "ipfs://2",
        "--key", KEY,
    ])?);
    let output = run(&[
        "mint-cli", "check", "--token-id", "2", "--uri", "ipfs://2", "--signature", &fresh,
        "--snapshot", snapshot_path,
    ])?;
    assert_eq!(output.messages(), vec!["issuable".to_string()]);

    let taken = signature_from(&run(&[
        "mint-cli", "--config", config_path, "sign", "--token-id", "1", "--uri", "ipfs://1",
        "--key", KEY,
    ])?);
    let output = run(&[
        "mint-cli", "check", "--token-id", "1", "--uri", "ipfs://1", "--signature", &taken,
        "--snapshot", snapshot_path,
    ])?;
    assert!(output.contains("rejected (Availability)"));

    let inspected = run(&["mint-cli", "inspect", "--snapshot", snapshot_path, "--token-id", "1"])?;
    assert!(inspected.contains("Claimed"));
    assert!(inspected.contains("ipfs://1"));
    Ok(())
}

#[test]
fn test_missing_snapshot_reports_path() {
    let err = run(&["mint-cli", "inspect", "--snapshot", "/nonexistent/snapshot.json"]).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/snapshot.json"));
}
