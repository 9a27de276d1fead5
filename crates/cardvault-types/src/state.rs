//! # Escrow lifecycle states
//!
//! One escrow account walks a four-state machine from creation to a
//! terminal outcome:
//!
//! ```text
//!   ┌──────────────────┐  deposit   ┌──────────────────────┐  confirm   ┌──────────┐
//!   │ AWAITING_PAYMENT ├───────────▶│ AWAITING_CONFIRMATION ├──────────▶│ COMPLETE │
//!   └────────┬─────────┘            └──────────┬────────────┘           └──────────┘
//!            │ cancel                          │ cancel
//!            ▼                                 ▼
//!       ┌──────────┐                      ┌──────────┐
//!       │ CANCELED │                      │ CANCELED │
//!       └──────────┘                      └──────────┘
//! ```
//!
//! Transitions are **monotonic**: no state is ever revisited, and both
//! `Complete` and `Canceled` are terminal.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a single escrow account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowState {
    /// Created by the factory; waiting for the buyer's deposit.
    AwaitingPayment,
    /// Deposit held in custody; waiting for the buyer to confirm receipt.
    AwaitingConfirmation,
    /// Buyer confirmed receipt. The seller may now release the funds.
    /// **Irreversible.**
    Complete,
    /// The sale was withdrawn before completion. Any held deposit was
    /// refunded to the buyer. **Irreversible.**
    Canceled,
}

impl EscrowState {
    /// Can this state transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::AwaitingPayment, Self::AwaitingConfirmation | Self::Canceled)
                | (Self::AwaitingConfirmation, Self::Complete | Self::Canceled)
        )
    }

    /// Whether this state admits no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Canceled)
    }
}

impl std::fmt::Display for EscrowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingPayment => write!(f, "AWAITING_PAYMENT"),
            Self::AwaitingConfirmation => write!(f, "AWAITING_CONFIRMATION"),
            Self::Complete => write!(f, "COMPLETE"),
            Self::Canceled => write!(f, "CANCELED"),
        }
    }
}
