//! # cardvault-escrow
//!
//! **Custody plane**: per-auction escrow accounts, the ledger they custody
//! value on, and the factory that instantiates them.
//!
//! ## Architecture
//!
//! The custody plane sits between the off-chain auction service and the
//! ledger:
//! 1. **Ledger**: per-party native-unit balances with mint/burn supply
//!    tracking
//! 2. **EscrowAccount**: one instance per resolved auction, walking a
//!    four-state machine to completion or cancellation
//! 3. **EscrowLogic**: the versioned strategy each account is pinned to at
//!    creation
//! 4. **EscrowFactory**: creates accounts, routes operations to them by
//!    handle, and owns the swappable implementation
//!
//! ## Settlement Flow
//!
//! ```text
//! auction resolves → Factory::create_escrow(seller, buyer, amount)
//!                  → buyer deposits exactly `amount`
//!                  → buyer confirms receipt
//!                  → seller releases funds
//! ```
//!
//! Every operation is a single atomic unit: it either completes fully or
//! aborts with a typed [`cardvault_types::CustodyError`] and no partial
//! state change.

pub mod account;
pub mod factory;
pub mod ledger;
pub mod logic;

pub use account::EscrowAccount;
pub use factory::EscrowFactory;
pub use ledger::Ledger;
pub use logic::{EscrowLogic, StandardEscrowLogic};
