//! Identifier lifecycle store
//!
//! Lifecycle state is never stored as an enum. It is derived on every read
//! from two per-identifier flags and one global floor:
//!
//! - **claimed**: issued and not yet released
//! - **revoked**: one-way, set by explicit revocation or by release
//! - **floor**: every identifier below it is unavailable, without a
//!   per-identifier write
//!
//! Principal checks are not made here; the contract gates every call.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use lib_types::TokenId;

use crate::errors::{IssuanceError, IssuanceResult};

/// Lifecycle state derived from flags and floor at the time of the call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierState {
    Available,
    Claimed,
    Revoked,
    BelowFloor,
}

/// Per-identifier flags, metadata pointers, floor and aggregate supply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierLifecycle {
    claimed: BTreeSet<TokenId>,
    revoked: BTreeSet<TokenId>,
    metadata: BTreeMap<TokenId, String>,
    floor: u64,
    total_supply: u64,
}

impl IdentifierLifecycle {
    /// Empty store: every identifier is available, floor is 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted parts. Invariants are not checked
    /// here; see [`IdentifierLifecycle::check_invariants`].
    pub(crate) fn from_parts(
        claimed: BTreeMap<TokenId, String>,
        revoked: BTreeSet<TokenId>,
        floor: u64,
        total_supply: u64,
    ) -> Self {
        Self {
            claimed: claimed.keys().copied().collect(),
            revoked,
            metadata: claimed,
            floor,
            total_supply,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn floor(&self) -> u64 {
        self.floor
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn is_claimed(&self, id: TokenId) -> bool {
        self.claimed.contains(&id)
    }

    pub fn is_revoked(&self, id: TokenId) -> bool {
        self.revoked.contains(&id)
    }

    /// Metadata pointer of a claimed identifier
    pub fn metadata_pointer(&self, id: TokenId) -> Option<&str> {
        self.metadata.get(&id).map(String::as_str)
    }

    /// Identifiers currently claimed, ascending
    pub fn claimed_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.claimed.iter().copied()
    }

    /// Identifiers explicitly revoked or released, ascending
    pub fn revoked_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.revoked.iter().copied()
    }

    /// Guard used by every mutating operation. Fails with the first violated
    /// condition: already claimed, then below floor, then revoked.
    pub fn ensure_available(&self, id: TokenId) -> IssuanceResult<()> {
        if self.claimed.contains(&id) {
            return Err(IssuanceError::AlreadyClaimed(id));
        }
        if id.value() < self.floor {
            return Err(IssuanceError::BelowFloor { id, floor: self.floor });
        }
        if self.revoked.contains(&id) {
            return Err(IssuanceError::Revoked(id));
        }
        Ok(())
    }

    pub fn is_available(&self, id: TokenId) -> bool {
        self.ensure_available(id).is_ok()
    }

    /// Derived state. Claimed wins over the floor so a live token below a
    /// raised floor still reads as claimed.
    pub fn state(&self, id: TokenId) -> IdentifierState {
        if self.claimed.contains(&id) {
            IdentifierState::Claimed
        } else if self.revoked.contains(&id) {
            IdentifierState::Revoked
        } else if id.value() < self.floor {
            IdentifierState::BelowFloor
        } else {
            IdentifierState::Available
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// available → claimed, recording the metadata pointer
    pub fn claim(&mut self, id: TokenId, metadata_pointer: &str) -> IssuanceResult<()> {
        self.ensure_available(id)?;
        if metadata_pointer.is_empty() {
            return Err(IssuanceError::EmptyMetadataPointer);
        }
        let new_supply = self
            .total_supply
            .checked_add(1)
            .ok_or(IssuanceError::Overflow)?;

        self.claimed.insert(id);
        self.metadata.insert(id, metadata_pointer.to_string());
        self.total_supply = new_supply;
        debug!(%id, supply = new_supply, "identifier claimed");
        Ok(())
    }

    /// available → revoked (terminal)
    pub fn revoke(&mut self, id: TokenId) -> IssuanceResult<()> {
        self.ensure_available(id)?;
        self.revoked.insert(id);
        Ok(())
    }

    /// Move the floor up. Equal or lower values are rejected.
    pub fn raise_floor(&mut self, new_floor: u64) -> IssuanceResult<()> {
        if new_floor <= self.floor {
            return Err(IssuanceError::FloorNotIncreasing {
                current: self.floor,
                requested: new_floor,
            });
        }
        self.floor = new_floor;
        Ok(())
    }

    /// claimed → revoked. A released identifier is never available again.
    pub fn release(&mut self, id: TokenId) -> IssuanceResult<()> {
        if !self.claimed.contains(&id) {
            return Err(IssuanceError::NotClaimed(id));
        }
        let new_supply = self
            .total_supply
            .checked_sub(1)
            .ok_or(IssuanceError::Underflow)?;

        self.claimed.remove(&id);
        self.metadata.remove(&id);
        self.revoked.insert(id);
        self.total_supply = new_supply;
        debug!(%id, supply = new_supply, "identifier released");
        Ok(())
    }

    /// Structural invariants of the store
    pub fn check_invariants(&self) -> IssuanceResult<()> {
        if self.total_supply != self.claimed.len() as u64 {
            return Err(IssuanceError::InvariantViolated(format!(
                "supply {} != claimed count {}",
                self.total_supply,
                self.claimed.len()
            )));
        }
        if let Some(id) = self.claimed.intersection(&self.revoked).next() {
            return Err(IssuanceError::InvariantViolated(format!(
                "token {} is both claimed and revoked",
                id
            )));
        }
        for id in &self.claimed {
            match self.metadata.get(id) {
                Some(pointer) if !pointer.is_empty() => {}
                _ => {
                    return Err(IssuanceError::InvariantViolated(format!(
                        "claimed token {} has no metadata pointer",
                        id
                    )))
                }
            }
        }
        if self.metadata.len() != self.claimed.len() {
            return Err(IssuanceError::InvariantViolated(
                "metadata pointer kept for an unclaimed token".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> TokenId {
        TokenId::new(n)
    }

    #[test]
    fn test_fresh_store_everything_available() {
        let store = IdentifierLifecycle::new();
        assert!(store.is_available(id(0)));
        assert!(store.is_available(id(u64::MAX)));
        assert_eq!(store.state(id(42)), IdentifierState::Available);
        assert_eq!(store.total_supply(), 0);
    }

    #[test]
    fn test_claim_sets_pointer_and_supply() {
        let mut store = IdentifierLifecycle::new();
        store.claim(id(1), "ipfs://a").unwrap();

        assert!(store.is_claimed(id(1)));
        assert_eq!(store.metadata_pointer(id(1)), Some("ipfs://a"));
        assert_eq!(store.total_supply(), 1);
        assert_eq!(store.ensure_available(id(1)), Err(IssuanceError::AlreadyClaimed(id(1))));
    }

    #[test]
    fn test_claim_empty_pointer_rejected_without_write() {
        let mut store = IdentifierLifecycle::new();
        let before = store.clone();
        assert_eq!(store.claim(id(1), ""), Err(IssuanceError::EmptyMetadataPointer));
        assert_eq!(store, before);
    }

    #[test]
    fn test_release_is_terminal() {
        let mut store = IdentifierLifecycle::new();
        store.claim(id(4), "ipfs://x").unwrap();
        store.release(id(4)).unwrap();

        assert!(!store.is_claimed(id(4)));
        assert!(store.is_revoked(id(4)));
        assert_eq!(store.metadata_pointer(id(4)), None);
        assert_eq!(store.total_supply(), 0);
        assert_eq!(store.state(id(4)), IdentifierState::Revoked);
        assert_eq!(store.claim(id(4), "ipfs://y"), Err(IssuanceError::Revoked(id(4))));
    }

    #[test]
    fn test_release_unclaimed_rejected() {
        let mut store = IdentifierLifecycle::new();
        assert_eq!(store.release(id(9)), Err(IssuanceError::NotClaimed(id(9))));
    }

    #[test]
    fn test_revoke_requires_available() {
        let mut store = IdentifierLifecycle::new();
        store.revoke(id(2)).unwrap();
        assert_eq!(store.revoke(id(2)), Err(IssuanceError::Revoked(id(2))));

        store.claim(id(3), "ipfs://c").unwrap();
        assert_eq!(store.revoke(id(3)), Err(IssuanceError::AlreadyClaimed(id(3))));
    }

    #[test]
    fn test_floor_is_strictly_monotonic() {
        let mut store = IdentifierLifecycle::new();
        store.raise_floor(10).unwrap();
        assert_eq!(
            store.raise_floor(10),
            Err(IssuanceError::FloorNotIncreasing { current: 10, requested: 10 })
        );
        assert_eq!(
            store.raise_floor(4),
            Err(IssuanceError::FloorNotIncreasing { current: 10, requested: 4 })
        );
        store.raise_floor(11).unwrap();
        assert_eq!(store.floor(), 11);
    }

    #[test]
    fn test_floor_invalidates_without_per_identifier_write() {
        let mut store = IdentifierLifecycle::new();
        store.raise_floor(10).unwrap();

        assert_eq!(
            store.ensure_available(id(3)),
            Err(IssuanceError::BelowFloor { id: id(3), floor: 10 })
        );
        assert_eq!(store.state(id(7)), IdentifierState::BelowFloor);
        assert!(store.is_available(id(12)));
        assert!(store.is_available(id(10)));
        assert_eq!(store.revoked_ids().count(), 0);
    }

    #[test]
    fn test_claimed_below_floor_still_claimed() {
        let mut store = IdentifierLifecycle::new();
        store.claim(id(3), "ipfs://c").unwrap();
        store.raise_floor(10).unwrap();

        assert_eq!(store.state(id(3)), IdentifierState::Claimed);
        assert_eq!(store.ensure_available(id(3)), Err(IssuanceError::AlreadyClaimed(id(3))));
        // Holder can still release it
        store.release(id(3)).unwrap();
        assert_eq!(store.total_supply(), 0);
    }

    #[test]
    fn test_invariants_hold_after_mixed_operations() {
        let mut store = IdentifierLifecycle::new();
        store.claim(id(1), "a").unwrap();
        store.claim(id(2), "b").unwrap();
        store.revoke(id(3)).unwrap();
        store.release(id(1)).unwrap();
        store.check_invariants().unwrap();
        assert_eq!(store.claimed_ids().collect::<Vec<_>>(), vec![id(2)]);
    }

    #[test]
    fn test_invariants_detect_bad_supply() {
        let mut claimed = BTreeMap::new();
        claimed.insert(id(1), "a".to_string());
        let store = IdentifierLifecycle::from_parts(claimed, BTreeSet::new(), 0, 2);
        assert!(matches!(
            store.check_invariants(),
            Err(IssuanceError::InvariantViolated(_))
        ));
    }
}
