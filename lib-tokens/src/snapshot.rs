//! Contract state snapshot
//!
//! A plain, serializable copy of everything a reader can inspect without
//! authorization. Restoring from a snapshot re-checks the cross-component
//! invariants, so a hand-edited file cannot produce an inconsistent contract.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use lib_crypto::Eip712Domain;
use lib_types::{Address, Amount, TokenId};

use crate::authorization::AuthorizationVerifier;
use crate::contract::IssuerContract;
use crate::custody::Treasury;
use crate::errors::{IssuanceError, IssuanceResult};
use crate::events::{EventLog, EventRecord};
use crate::lifecycle::IdentifierLifecycle;
use crate::ownership::OwnershipLedger;

/// One claimed identifier with its holder and metadata pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedRecord {
    pub id: TokenId,
    pub owner: Address,
    pub metadata_pointer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSnapshot {
    pub name: String,
    pub symbol: String,
    pub principal: Address,
    pub domain: Eip712Domain,
    pub floor: u64,
    pub total_supply: u64,
    pub balance: Amount,
    /// Ascending by identifier
    pub claimed: Vec<ClaimedRecord>,
    /// Ascending by identifier
    pub revoked: Vec<TokenId>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl ContractSnapshot {
    pub fn to_json(&self) -> IssuanceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| IssuanceError::InvariantViolated(format!("snapshot encode: {}", e)))
    }

    pub fn from_json(raw: &str) -> IssuanceResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| IssuanceError::Config(format!("Invalid snapshot: {}", e)))
    }
}

impl IssuerContract {
    /// Copy of the current inspectable state
    pub fn snapshot(&self) -> ContractSnapshot {
        let claimed = self
            .ownership
            .entries()
            .map(|(id, owner)| ClaimedRecord {
                id,
                owner,
                metadata_pointer: self
                    .lifecycle
                    .metadata_pointer(id)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();

        ContractSnapshot {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            principal: self.principal,
            domain: self.verifier.domain().clone(),
            floor: self.lifecycle.floor(),
            total_supply: self.lifecycle.total_supply(),
            balance: self.treasury.balance(),
            claimed,
            revoked: self.lifecycle.revoked_ids().collect(),
            events: self.events.records().to_vec(),
        }
    }

    /// Rebuild a contract from a snapshot, rejecting inconsistent state
    pub fn from_snapshot(snapshot: ContractSnapshot) -> IssuanceResult<Self> {
        if snapshot.principal.is_zero() {
            return Err(IssuanceError::Config(
                "principal must not be the zero address".to_string(),
            ));
        }

        let mut pointers = BTreeMap::new();
        let mut ownership = OwnershipLedger::new();
        for record in snapshot.claimed {
            if record.owner.is_zero() {
                return Err(IssuanceError::InvariantViolated(format!(
                    "token {} held by the zero address",
                    record.id
                )));
            }
            if pointers.insert(record.id, record.metadata_pointer).is_some() {
                return Err(IssuanceError::InvariantViolated(format!(
                    "token {} listed twice",
                    record.id
                )));
            }
            ownership.assign(record.id, record.owner);
        }
        let revoked: BTreeSet<TokenId> = snapshot.revoked.into_iter().collect();

        let contract = Self {
            name: snapshot.name,
            symbol: snapshot.symbol,
            principal: snapshot.principal,
            verifier: AuthorizationVerifier::new(snapshot.domain),
            lifecycle: IdentifierLifecycle::from_parts(
                pointers,
                revoked,
                snapshot.floor,
                snapshot.total_supply,
            ),
            ownership,
            treasury: Treasury::new(snapshot.balance),
            events: EventLog::from_records(snapshot.events)?,
        };
        contract.check_invariants()?;
        Ok(contract)
    }
}
