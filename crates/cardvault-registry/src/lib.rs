//! # cardvault-registry
//!
//! **Asset plane**: the upgradeable registry of non-fungible card ownership
//! tokens and their auction provenance.
//!
//! ## Architecture
//!
//! The registry is split along the upgrade seam:
//! 1. **RegistryStore**: the stable, additive-only data schema (token
//!    owners, delegated admin, histories, one-shot init flag)
//! 2. **RegistryLogic**: the versioned behavior swapped in place behind the
//!    fixed [`AssetRegistry`] handle
//! 3. **AssetRegistry**: the handle callers keep across upgrades
//!
//! ## Upgrade contract
//!
//! ```text
//! registry.upgrade_to(owner, Box::new(RegistryLogicV2))
//! ```
//!
//! replaces only the logic. Everything in the store — minted tokens,
//! ownership, backend admin, histories, the initialized flag — survives
//! byte-for-byte; only newly introduced behavior (the `version()` marker)
//! is observable as new.

pub mod logic;
pub mod registry;
pub mod store;

pub use logic::{RegistryLogic, RegistryLogicV1, RegistryLogicV2};
pub use registry::AssetRegistry;
pub use store::RegistryStore;
