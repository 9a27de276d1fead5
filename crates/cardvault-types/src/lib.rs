//! # cardvault-types
//!
//! Shared types, errors, and access-control primitives for the **CardVault**
//! settlement core.
//!
//! This crate is the leaf dependency of the workspace — both the escrow
//! custody plane and the asset registry depend on it. It defines:
//!
//! - **Identifiers**: [`PartyId`], [`EscrowId`], [`TokenId`]
//! - **Escrow lifecycle**: [`EscrowState`]
//! - **Notifications**: [`Notification`], [`NotificationKind`], [`NotificationLog`]
//! - **Provenance**: [`ProvenanceRecord`]
//! - **Access control**: [`Ownable`]
//! - **Errors**: [`CustodyError`] with `CV_ERR_` prefix codes

pub mod auth;
pub mod error;
pub mod ids;
pub mod notification;
pub mod provenance;
pub mod state;

// Re-export all primary types at crate root for ergonomic imports:
//   use cardvault_types::{PartyId, EscrowState, CustodyError, ...};

pub use auth::*;
pub use error::*;
pub use ids::*;
pub use notification::*;
pub use provenance::*;
pub use state::*;
