//! Error types for the CardVault settlement core.
//!
//! All errors use the `CV_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors
//! - 2xx: State errors
//! - 3xx: Validation errors
//! - 4xx: Not-found errors
//! - 5xx: Ledger errors
//! - 9xx: General / internal errors
//!
//! Every violation aborts the triggering operation with no partial state
//! change and surfaces as one of these named conditions, never a generic
//! failure — the calling layer maps each variant to a precise user message.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{EscrowId, PartyId, TokenId};

/// Central error enum for all CardVault operations.
#[derive(Debug, Error)]
pub enum CustodyError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The caller is not the escrow's buyer (deposit / confirm attempted).
    #[error("CV_ERR_100: Not buyer: {caller}")]
    NotBuyer { caller: PartyId },

    /// The caller is not the escrow's seller (release / cancel attempted).
    #[error("CV_ERR_101: Not seller: {caller}")]
    NotSeller { caller: PartyId },

    /// The caller does not own the factory / registry.
    #[error("CV_ERR_102: Unauthorized owner account: {caller}")]
    UnauthorizedOwner { caller: PartyId },

    /// The caller is not the delegated backend admin. Owner included:
    /// minting and history writes are backend-only by design.
    #[error("CV_ERR_103: Not authorized: backend only")]
    NotBackendAdmin,

    // =================================================================
    // State Errors (2xx)
    // =================================================================
    /// The operation was attempted outside its valid escrow state.
    #[error("CV_ERR_200: Invalid state: {reason}")]
    InvalidState { reason: String },

    /// `initialize` was called on an already-initialized registry instance.
    #[error("CV_ERR_201: Invalid initialization: instance already initialized")]
    InvalidInitialization,

    // =================================================================
    // Validation Errors (3xx)
    // =================================================================
    /// The deposited value does not match the escrow amount exactly.
    #[error("CV_ERR_300: Incorrect amount: expected {expected}, got {got}")]
    IncorrectAmount { expected: Decimal, got: Decimal },

    /// An escrow cannot be created for a non-positive amount.
    #[error("CV_ERR_301: Invalid escrow amount: {0}")]
    InvalidAmount(Decimal),

    /// The token identifier is already in use.
    #[error("CV_ERR_302: Token already minted: {0}")]
    TokenAlreadyMinted(TokenId),

    // =================================================================
    // Not-Found Errors (4xx)
    // =================================================================
    /// No escrow account exists for this handle.
    #[error("CV_ERR_400: Escrow not found: {0}")]
    EscrowNotFound(EscrowId),

    /// No token with this identifier was ever minted.
    #[error("CV_ERR_401: Token not found: {0}")]
    TokenNotFound(TokenId),

    // =================================================================
    // Ledger Errors (5xx)
    // =================================================================
    /// Not enough available balance to perform the operation.
    #[error("CV_ERR_500: Insufficient available balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// Supply conservation invariant violated — critical safety alert.
    #[error("CV_ERR_501: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CV_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("CV_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CustodyError>;
