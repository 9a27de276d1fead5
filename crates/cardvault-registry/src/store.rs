//! The registry's stable storage schema.
//!
//! This struct is the data an upgrade must carry forward intact. Schema
//! evolution is additive-only: never reorder or remove fields across
//! versions; bump `schema_version` and append new fields with defaults.

use std::collections::BTreeMap;

use cardvault_types::{PartyId, ProvenanceRecord, TokenId};
use serde::{Deserialize, Serialize};

/// Current storage schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Everything the asset registry persists across logic upgrades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStore {
    /// Storage layout version (not the logic version).
    pub schema_version: u32,
    /// Whether `initialize` has run. Exactly-once per instance lifetime,
    /// regardless of how many logic upgrades happen afterwards.
    pub initialized: bool,
    /// Administrative owner, set by `initialize`.
    pub owner: Option<PartyId>,
    /// Delegated identity permitted to mint and append history. Distinct
    /// from `owner` with no implicit escalation.
    pub backend_admin: Option<PartyId>,
    /// Token ownership map.
    pub owners: BTreeMap<TokenId, PartyId>,
    /// Append-only auction history per token.
    pub histories: BTreeMap<TokenId, Vec<ProvenanceRecord>>,
}

impl RegistryStore {
    /// Create an empty, uninitialized store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            initialized: false,
            owner: None,
            backend_admin: None,
            owners: BTreeMap::new(),
            histories: BTreeMap::new(),
        }
    }

    /// Whether a token with this id was ever minted.
    #[must_use]
    pub fn token_exists(&self, token: TokenId) -> bool {
        self.owners.contains_key(&token)
    }

    /// Number of tokens ever minted.
    #[must_use]
    pub fn total_minted(&self) -> usize {
        self.owners.len()
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty_and_uninitialized() {
        let store = RegistryStore::new();
        assert_eq!(store.schema_version, SCHEMA_VERSION);
        assert!(!store.initialized);
        assert!(store.owner.is_none());
        assert!(store.backend_admin.is_none());
        assert_eq!(store.total_minted(), 0);
        assert!(!store.token_exists(TokenId(1)));
    }

    #[test]
    fn serde_roundtrip_preserves_everything() {
        let mut store = RegistryStore::new();
        store.initialized = true;
        store.owner = Some(PartyId::new());
        store.backend_admin = Some(PartyId::new());
        let holder = PartyId::new();
        store.owners.insert(TokenId(1), holder);

        let json = serde_json::to_string(&store).unwrap();
        let back: RegistryStore = serde_json::from_str(&json).unwrap();
        assert!(back.initialized);
        assert_eq!(back.owner, store.owner);
        assert_eq!(back.owners.get(&TokenId(1)), Some(&holder));
    }
}
