//! Base58Check address derivation.
//!
//! An address is derived from key bytes by the fixed pipeline
//! SHA-256 → RIPEMD-160 → version byte → double-SHA-256 checksum → Base58.
//! The pipeline is a pure function: the same input bytes always produce the
//! same address.

use crate::crypto::{PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
use crate::error::{Result, WalletError};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Network marker prepended to the RIPEMD-160 digest.
pub const ADDRESS_VERSION: u8 = 0x00;

/// Number of checksum bytes appended before Base58 encoding.
pub const CHECKSUM_SIZE: usize = 4;

/// Version byte plus 20-byte RIPEMD-160 digest.
const PAYLOAD_SIZE: usize = 21;

/// Derives a Base58Check address from key bytes.
///
/// Accepts the 64-byte uncompressed public key coordinates (the default and
/// recommended input) or a raw 32-byte secret scalar (supported for
/// compatibility with identities created from exported secret material; not
/// recommended, since an address should never be traceable to secret bytes).
///
/// Because the version byte is `0x00`, every address starts with at least one
/// literal `1`.
pub fn derive_address(key_bytes: &[u8]) -> Result<String> {
    if key_bytes.len() != PUBLIC_KEY_SIZE && key_bytes.len() != SECRET_KEY_SIZE {
        return Err(WalletError::InvalidInputLength(format!(
            "Key must be {} or {} bytes, got {}",
            PUBLIC_KEY_SIZE,
            SECRET_KEY_SIZE,
            key_bytes.len()
        )));
    }

    let sha = Sha256::digest(key_bytes);
    let ripe = Ripemd160::digest(sha);

    let mut payload = [0u8; PAYLOAD_SIZE];
    payload[0] = ADDRESS_VERSION;
    payload[1..].copy_from_slice(&ripe);

    let checksum = double_sha256(&payload);

    let mut extended = [0u8; PAYLOAD_SIZE + CHECKSUM_SIZE];
    extended[..PAYLOAD_SIZE].copy_from_slice(&payload);
    extended[PAYLOAD_SIZE..].copy_from_slice(&checksum[..CHECKSUM_SIZE]);

    Ok(bs58::encode(extended).into_string())
}

/// Decodes a Base58Check address back to its 21-byte payload
/// (version byte plus RIPEMD-160 digest), verifying the checksum.
pub fn decode_address(address: &str) -> Result<Vec<u8>> {
    let extended = bs58::decode(address)
        .into_vec()
        .map_err(|e| WalletError::InvalidAddress(format!("Invalid Base58: {}", e)))?;

    if extended.len() != PAYLOAD_SIZE + CHECKSUM_SIZE {
        return Err(WalletError::InvalidAddress(format!(
            "Address must decode to {} bytes, got {}",
            PAYLOAD_SIZE + CHECKSUM_SIZE,
            extended.len()
        )));
    }

    let (payload, checksum) = extended.split_at(PAYLOAD_SIZE);
    let expected = double_sha256(payload);
    if checksum != &expected[..CHECKSUM_SIZE] {
        return Err(WalletError::InvalidAddress(
            "Checksum mismatch".to_string(),
        ));
    }

    Ok(payload.to_vec())
}

fn double_sha256(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(bytes)).into()
}
