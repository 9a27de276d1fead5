//! Provenance records for the asset registry's auction history.
//!
//! Each record is an immutable entry describing one historical transfer of
//! a card: who sold, who bought, at what price, and when. Histories are
//! append-only — records are never edited or removed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PartyId;

/// One historical auction settlement for a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    /// The party that sold the card.
    pub seller: PartyId,
    /// The party that bought the card.
    pub buyer: PartyId,
    /// Final auction price in the ledger's native unit.
    pub price: Decimal,
    /// When the auction resolved, as reported by the backend.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let record = ProvenanceRecord {
            seller: PartyId::new(),
            buyer: PartyId::new(),
            price: Decimal::new(15, 1), // 1.5
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ProvenanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
