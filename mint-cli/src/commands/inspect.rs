//! Snapshot inspection

use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::debug;

use lib_tokens::{ContractSnapshot, IssuerContract};
use lib_types::TokenId;

use crate::argument_parsing::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::Output;

/// Read a JSON snapshot and rebuild the contract from it
pub fn load_snapshot(path: &Path) -> CliResult<IssuerContract> {
    let raw = fs::read_to_string(path).map_err(|e| CliError::SnapshotLoadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let snapshot = ContractSnapshot::from_json(&raw)?;
    let contract = IssuerContract::from_snapshot(snapshot)?;
    debug!(path = %path.display(), supply = contract.total_supply(), "snapshot loaded");
    Ok(contract)
}

pub fn handle_inspect(
    path: &Path,
    token_id: Option<u64>,
    format: OutputFormat,
    output: &dyn Output,
) -> CliResult<()> {
    let contract = load_snapshot(path)?;

    if let Some(raw_id) = token_id {
        let id = TokenId::new(raw_id);
        let state = contract.identifier_state(id);
        let owner = contract.owner_of(id);
        let pointer = contract.metadata_pointer(id);
        return match format {
            OutputFormat::Json => output.print_json(&json!({
                "token_id": id,
                "state": state,
                "owner": owner,
                "metadata_pointer": pointer,
            })),
            OutputFormat::Text => {
                output.field("token", &id.to_string())?;
                output.field("state", &format!("{:?}", state))?;
                if let Some(owner) = owner {
                    output.field("owner", &owner.to_string())?;
                }
                if let Some(pointer) = pointer {
                    output.field("uri", pointer)?;
                }
                Ok(())
            }
        };
    }

    match format {
        OutputFormat::Json => output.print(&contract.snapshot().to_json()?),
        OutputFormat::Text => {
            output.field("name", contract.name())?;
            output.field("symbol", contract.symbol())?;
            output.field("principal", &contract.principal().to_string())?;
            output.field("floor", &contract.floor().to_string())?;
            output.field("supply", &contract.total_supply().to_string())?;
            output.field("balance", &contract.balance().to_string())?;
            output.field("events", &contract.events().len().to_string())
        }
    }
}
