//! Meridian wallet core - account identity and transaction signing
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Cryptography
//! - [`crypto`] - ECDSA key pairs, signing and verification (NIST P-256)
//! - [`address`] - Base58Check address derivation
//!
//! ## Transactions
//! - [`transaction`] - Canonical transfer serialization and signatures
//!
//! ## Identity
//! - [`wallet`] - Wallet operations tying keys and addresses together
//!
//! ## Utilities
//! - [`error`] - Error types
//!
//! All operations are pure and stateless across calls; the only shared
//! resource is the OS entropy pool consumed during key generation and
//! random-nonce signing, so every call is safe to run concurrently.

#![forbid(unsafe_code)]

// ============================================================================
// Cryptography
// ============================================================================
pub mod address;
pub mod crypto;

// ============================================================================
// Transactions
// ============================================================================
pub mod transaction;

// ============================================================================
// Identity
// ============================================================================
pub mod wallet;

// ============================================================================
// Utilities
// ============================================================================
pub mod error;
