//! Globally unique identifiers used throughout CardVault.
//!
//! Party identities use UUIDv7 for time-ordered lexicographic sorting.
//! Escrow handles are derived deterministically from their creation
//! parameters so that every external indexer computes the same handle
//! for the n-th escrow a factory creates.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// PartyId
// ---------------------------------------------------------------------------

/// Identity of a transacting party: seller, buyer, registry owner, or the
/// delegated backend admin. Supplied by the (already authenticated) calling
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PartyId(pub Uuid);

impl PartyId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for PartyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EscrowId
// ---------------------------------------------------------------------------

/// Handle of a single escrow account created by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EscrowId(pub Uuid);

impl EscrowId {
    /// Deterministic `EscrowId` from the factory's creation index and the
    /// (seller, buyer) pair.
    ///
    /// The factory's escrow list is enumerated by external indexers; deriving
    /// the handle from the creation index means any observer reconstructs the
    /// same handle for the same escrow.
    #[must_use]
    pub fn deterministic(creation_index: u64, seller: PartyId, buyer: PartyId) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"cardvault:escrow_id:v1:");
        hasher.update(creation_index.to_le_bytes());
        hasher.update(seller.0.as_bytes());
        hasher.update(buyer.0.as_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for EscrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "esc:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identifier of a non-fungible ownership token in the asset registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_id_uniqueness() {
        let a = PartyId::new();
        let b = PartyId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn party_id_ordering() {
        let a = PartyId::new();
        let b = PartyId::new();
        assert!(a < b);
    }

    #[test]
    fn escrow_id_deterministic() {
        let seller = PartyId::new();
        let buyer = PartyId::new();
        let a = EscrowId::deterministic(0, seller, buyer);
        let b = EscrowId::deterministic(0, seller, buyer);
        assert_eq!(a, b);
        let c = EscrowId::deterministic(1, seller, buyer);
        assert_ne!(a, c);
    }

    #[test]
    fn escrow_id_stable_over_random_inputs() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let index: u64 = rng.r#gen();
            let seller = PartyId::from_bytes(rng.r#gen());
            let buyer = PartyId::from_bytes(rng.r#gen());
            assert_eq!(
                EscrowId::deterministic(index, seller, buyer),
                EscrowId::deterministic(index, seller, buyer),
            );
        }
    }

    #[test]
    fn escrow_id_differs_by_parties() {
        let seller = PartyId::new();
        let a = EscrowId::deterministic(0, seller, PartyId::new());
        let b = EscrowId::deterministic(0, seller, PartyId::new());
        assert_ne!(a, b);
    }

    #[test]
    fn token_id_display() {
        assert_eq!(format!("{}", TokenId(7)), "token:7");
    }

    #[test]
    fn serde_roundtrips() {
        let pid = PartyId::new();
        let json = serde_json::to_string(&pid).unwrap();
        let back: PartyId = serde_json::from_str(&json).unwrap();
        assert_eq!(pid, back);

        let eid = EscrowId::deterministic(3, PartyId::new(), PartyId::new());
        let json = serde_json::to_string(&eid).unwrap();
        let back: EscrowId = serde_json::from_str(&json).unwrap();
        assert_eq!(eid, back);

        let tid = TokenId(42);
        let json = serde_json::to_string(&tid).unwrap();
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(tid, back);
    }
}
