//! Ownership primitive shared by the escrow factory and the asset registry.
//!
//! Authorization is an explicit permission check evaluated before every
//! mutating operation, returning a typed error that identifies the rejected
//! caller. `owner` and the registry's delegated `backend_admin` are distinct
//! roles with no implicit escalation — owning a component does not grant
//! admin rights, and vice versa.

use serde::{Deserialize, Serialize};

use crate::{CustodyError, PartyId, Result};

/// Single-owner access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownable {
    owner: PartyId,
}

impl Ownable {
    /// Create with the given initial owner.
    #[must_use]
    pub fn new(owner: PartyId) -> Self {
        Self { owner }
    }

    /// The current owner.
    #[must_use]
    pub fn owner(&self) -> PartyId {
        self.owner
    }

    /// Guard an owner-only operation.
    ///
    /// # Errors
    /// Returns [`CustodyError::UnauthorizedOwner`] naming the rejected
    /// caller if `caller` is not the owner.
    pub fn ensure_owner(&self, caller: PartyId) -> Result<()> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(CustodyError::UnauthorizedOwner { caller })
        }
    }

    /// Hand ownership to a new party. Caller must be the current owner.
    pub fn transfer_ownership(&mut self, caller: PartyId, new_owner: PartyId) -> Result<()> {
        self.ensure_owner(caller)?;
        self.owner = new_owner;
        Ok(())
    }
}
