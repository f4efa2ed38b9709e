//! Ownership ledger
//!
//! Holder of each claimed identifier and per-address holdings. Mutation is
//! crate-private: the contract keeps it in step with the lifecycle store, so
//! an identifier has an owner exactly when it is claimed.

use std::collections::BTreeMap;

use lib_types::{Address, TokenId};

use crate::errors::{IssuanceError, IssuanceResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipLedger {
    owners: BTreeMap<TokenId, Address>,
    balances: BTreeMap<Address, u64>,
}

impl OwnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current holder, if the identifier is claimed
    pub fn owner_of(&self, id: TokenId) -> Option<Address> {
        self.owners.get(&id).copied()
    }

    /// Number of identifiers held by `holder`
    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// All (identifier, holder) pairs, ascending by identifier
    pub fn entries(&self) -> impl Iterator<Item = (TokenId, Address)> + '_ {
        self.owners.iter().map(|(id, owner)| (*id, *owner))
    }

    /// Caller must be the current holder of `id`
    pub fn ensure_holder(&self, id: TokenId, caller: &Address) -> IssuanceResult<()> {
        match self.owners.get(&id) {
            None => Err(IssuanceError::NotClaimed(id)),
            Some(owner) if owner != caller => Err(IssuanceError::NotHolder {
                caller: *caller,
                id,
            }),
            Some(_) => Ok(()),
        }
    }

    pub(crate) fn assign(&mut self, id: TokenId, to: Address) {
        self.owners.insert(id, to);
        let held = self.balances.entry(to).or_insert(0);
        *held = held.saturating_add(1);
    }

    pub(crate) fn remove(&mut self, id: TokenId) -> Option<Address> {
        let owner = self.owners.remove(&id)?;
        self.decrement(&owner);
        Some(owner)
    }

    pub(crate) fn reassign(&mut self, id: TokenId, to: Address) -> Option<Address> {
        let from = self.remove(id)?;
        self.assign(id, to);
        Some(from)
    }

    fn decrement(&mut self, holder: &Address) {
        if let Some(held) = self.balances.get_mut(holder) {
            *held = held.saturating_sub(1);
            if *held == 0 {
                self.balances.remove(holder);
            }
        }
    }
}
