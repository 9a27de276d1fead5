//! The native-unit ledger escrow accounts custody value on.
//!
//! Tracks per-party available balances plus mint/burn totals for supply
//! verification. All mutations are atomic: either the full operation
//! succeeds or the balance is unchanged.

use std::collections::HashMap;

use cardvault_types::{CustodyError, PartyId, Result};
use rust_decimal::Decimal;

/// Source of truth for all party balances in the ledger's native unit.
///
/// The escrow factory debits buyers into custody and credits sellers (or
/// refunds buyers) out of it. Value enters the ledger only through
/// [`Ledger::mint`] and leaves only through [`Ledger::burn`] — both belong
/// to the off-scope cash-in/cash-out layer, so everything in between must
/// conserve supply.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Per-party available balances.
    balances: HashMap<PartyId, Decimal>,
    /// Total value ever minted into the ledger.
    minted: Decimal,
    /// Total value ever burned out of the ledger.
    burned: Decimal,
}

impl Ledger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            minted: Decimal::ZERO,
            burned: Decimal::ZERO,
        }
    }

    /// Mint value into a party's balance (external funding).
    pub fn mint(&mut self, party: PartyId, amount: Decimal) {
        *self.balances.entry(party).or_insert(Decimal::ZERO) += amount;
        self.minted += amount;
    }

    /// Burn value out of a party's balance (external withdrawal).
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the party cannot cover `amount`.
    pub fn burn(&mut self, party: PartyId, amount: Decimal) -> Result<()> {
        self.debit(party, amount)?;
        self.burned += amount;
        Ok(())
    }

    /// Remove value from a party's balance.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if available < amount; the balance is
    /// unchanged on error.
    pub fn debit(&mut self, party: PartyId, amount: Decimal) -> Result<()> {
        let balance = self
            .balances
            .get_mut(&party)
            .ok_or(CustodyError::InsufficientBalance {
                needed: amount,
                available: Decimal::ZERO,
            })?;

        if *balance < amount {
            return Err(CustodyError::InsufficientBalance {
                needed: amount,
                available: *balance,
            });
        }

        *balance -= amount;
        Ok(())
    }

    /// Add value to a party's balance.
    pub fn credit(&mut self, party: PartyId, amount: Decimal) {
        *self.balances.entry(party).or_insert(Decimal::ZERO) += amount;
    }

    /// A party's available balance (zero if never seen).
    #[must_use]
    pub fn balance(&self, party: PartyId) -> Decimal {
        self.balances.get(&party).copied().unwrap_or(Decimal::ZERO)
    }

    /// Sum of all party balances.
    #[must_use]
    pub fn total_balances(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Verify the supply conservation invariant:
    ///
    /// ```text
    /// Σ(party balances) + value held in escrow == Σ(mints) - Σ(burns)
    /// ```
    ///
    /// `held_in_escrow` is the total custody value reported by the factory.
    ///
    /// # Errors
    /// Returns [`CustodyError::SupplyInvariantViolation`] if the books do
    /// not balance — something has gone catastrophically wrong.
    pub fn verify_supply(&self, held_in_escrow: Decimal) -> Result<()> {
        let expected = self.minted - self.burned;
        let actual = self.total_balances() + held_in_escrow;
        if actual != expected {
            return Err(CustodyError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual} != expected {expected} \
                     (balances={}, held={held_in_escrow}, minted={}, burned={})",
                    self.total_balances(),
                    self.minted,
                    self.burned,
                ),
            });
        }
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_increases_balance() {
        let mut ledger = Ledger::new();
        let party = PartyId::new();
        ledger.mint(party, Decimal::new(1000, 0));
        assert_eq!(ledger.balance(party), Decimal::new(1000, 0));
    }

    #[test]
    fn debit_and_credit_move_value() {
        let mut ledger = Ledger::new();
        let a = PartyId::new();
        let b = PartyId::new();
        ledger.mint(a, Decimal::new(100, 0));
        ledger.debit(a, Decimal::new(40, 0)).unwrap();
        ledger.credit(b, Decimal::new(40, 0));
        assert_eq!(ledger.balance(a), Decimal::new(60, 0));
        assert_eq!(ledger.balance(b), Decimal::new(40, 0));
    }

    #[test]
    fn debit_insufficient_fails_unchanged() {
        let mut ledger = Ledger::new();
        let party = PartyId::new();
        ledger.mint(party, Decimal::new(100, 0));
        let err = ledger.debit(party, Decimal::new(200, 0)).unwrap_err();
        assert!(matches!(err, CustodyError::InsufficientBalance { .. }));
        assert_eq!(ledger.balance(party), Decimal::new(100, 0));
    }

    #[test]
    fn debit_unknown_party_fails() {
        let mut ledger = Ledger::new();
        let err = ledger.debit(PartyId::new(), Decimal::ONE).unwrap_err();
        assert!(matches!(
            err,
            CustodyError::InsufficientBalance { available, .. } if available == Decimal::ZERO
        ));
    }

    #[test]
    fn burn_reduces_supply() {
        let mut ledger = Ledger::new();
        let party = PartyId::new();
        ledger.mint(party, Decimal::new(10, 0));
        ledger.burn(party, Decimal::new(3, 0)).unwrap();
        assert_eq!(ledger.balance(party), Decimal::new(7, 0));
        ledger.verify_supply(Decimal::ZERO).unwrap();
    }

    #[test]
    fn verify_supply_accounts_for_held_value() {
        let mut ledger = Ledger::new();
        let buyer = PartyId::new();
        ledger.mint(buyer, Decimal::new(10, 0));

        // Move 4 into custody (as the factory would on deposit).
        ledger.debit(buyer, Decimal::new(4, 0)).unwrap();
        assert!(ledger.verify_supply(Decimal::ZERO).is_err());
        ledger.verify_supply(Decimal::new(4, 0)).unwrap();
    }

    #[test]
    fn verify_supply_detects_imbalance() {
        let mut ledger = Ledger::new();
        ledger.mint(PartyId::new(), Decimal::new(5, 0));
        let err = ledger.verify_supply(Decimal::ONE).unwrap_err();
        assert!(matches!(
            err,
            CustodyError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn unknown_balance_is_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance(PartyId::new()), Decimal::ZERO);
    }
}
