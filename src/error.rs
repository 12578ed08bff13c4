//! Error types for the Meridian wallet core

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    InvalidInputLength(String),
    InvalidKeyEncoding(String),
    MalformedSignature(String),
    InvalidAddress(String),
    EntropyUnavailable(String),
    CryptoError(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WalletError::InvalidInputLength(msg) => write!(f, "Invalid input length: {}", msg),
            WalletError::InvalidKeyEncoding(msg) => write!(f, "Invalid key encoding: {}", msg),
            WalletError::MalformedSignature(msg) => write!(f, "Malformed signature: {}", msg),
            WalletError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            WalletError::EntropyUnavailable(msg) => write!(f, "Entropy unavailable: {}", msg),
            WalletError::CryptoError(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, WalletError>;
