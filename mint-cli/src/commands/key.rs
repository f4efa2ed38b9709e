//! Principal key commands

use serde_json::json;
use tracing::info;

use lib_crypto::SigningKeyPair;

use crate::argument_parsing::OutputFormat;
use crate::error::CliResult;
use crate::logic::parse_key;
use crate::output::Output;

pub fn handle_keygen(format: OutputFormat, output: &dyn Output) -> CliResult<()> {
    let key = SigningKeyPair::generate();
    info!(address = %key.address(), "generated principal key");

    match format {
        OutputFormat::Json => output.print_json(&json!({
            "address": key.address(),
            "secret": format!("0x{}", key.secret_hex()),
        })),
        OutputFormat::Text => {
            output.field("address", &key.address().to_string())?;
            output.field("secret", &format!("0x{}", key.secret_hex()))
        }
    }
}

pub fn handle_address(raw_key: &str, format: OutputFormat, output: &dyn Output) -> CliResult<()> {
    let key = parse_key(raw_key)?;
    match format {
        OutputFormat::Json => output.print_json(&json!({ "address": key.address() })),
        OutputFormat::Text => output.print(&key.address().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CapturedOutput;

    #[test]
    fn test_address_of_known_key() {
        let output = CapturedOutput::new();
        handle_address(
            "c85ef7d79691fe79573b1a7064c19c1a9819ebdbd1faaab1a8ec92344438aaf4",
            OutputFormat::Text,
            &output,
        )
        .unwrap();
        assert_eq!(
            output.messages(),
            vec!["0xcd2a3d9f938e13cd947ec05abc7fe734df8dd826".to_string()]
        );
    }

    #[test]
    fn test_keygen_prints_usable_secret() {
        let output = CapturedOutput::new();
        handle_keygen(OutputFormat::Json, &output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output.messages()[0]).unwrap();
        let secret = value["secret"].as_str().unwrap();
        let key = parse_key(secret).unwrap();
        assert_eq!(value["address"].as_str().unwrap(), key.address().to_string());
    }
}
