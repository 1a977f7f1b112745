//! Shared error codes and identity helpers for the medical records registry.
//!
//! This crate provides:
//! - [`CommonError`]: errors raised by the identity helpers.
//! - DID syntax validation usable from `no_std` contract code.
//! - Deterministic DID derivation from wallet addresses (requires `std` feature),
//!   for the off-chain API layer that maps wallets to identities.
//!
//! Contracts map these errors into their own enums.

#![cfg_attr(not(feature = "std"), no_std)]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod did;

pub use did::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Errors raised by the shared identity helpers.
///
/// Codes sit in the 30s, the validation range used across the registry.
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    /// An identity string does not follow the `did:<method>:<id>` form.
    InvalidIdentity = 31,

    /// A wallet address is not `0x` followed by 40 hex digits.
    InvalidAddress = 32,
}
