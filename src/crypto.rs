//! ECDSA key pairs and signatures on NIST P-256.

use crate::error::{Result, WalletError};
use p256::ecdsa::signature::{RandomizedSigner, Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::generic_array::GenericArray;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::EncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore;

/// Size of a serialized secret scalar in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of a serialized public key in bytes: the affine `x` and `y`
/// coordinates concatenated, each 32 bytes big-endian, no SEC1 tag.
pub const PUBLIC_KEY_SIZE: usize = 64;

/// Size of a serialized signature in bytes: `r || s`, each zero-padded
/// to the 32-byte scalar width.
pub const SIGNATURE_SIZE: usize = 64;

/// Scalars outside `[1, order-1]` are re-sampled; hitting this cap means
/// the random source is returning garbage.
const MAX_SCALAR_RESAMPLES: usize = 16;

#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Generates a new random KeyPair using the OS random number generator.
    ///
    /// Out-of-range scalars (zero or not below the curve order) are re-sampled
    /// internally; the caller only sees an error if the entropy source itself
    /// fails.
    pub fn generate() -> Result<Self> {
        let mut candidate = [0u8; SECRET_KEY_SIZE];
        for _ in 0..MAX_SCALAR_RESAMPLES {
            OsRng
                .try_fill_bytes(&mut candidate)
                .map_err(|e| WalletError::EntropyUnavailable(e.to_string()))?;

            if let Ok(signing_key) = SigningKey::from_slice(&candidate) {
                let verifying_key = *signing_key.verifying_key();
                return Ok(KeyPair {
                    signing_key,
                    verifying_key,
                });
            }
        }

        Err(WalletError::EntropyUnavailable(
            "random source repeatedly produced out-of-range scalars".to_string(),
        ))
    }

    /// Creates a KeyPair from raw secret scalar bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(WalletError::InvalidInputLength(format!(
                "Secret key must be {} bytes, got {}",
                SECRET_KEY_SIZE,
                bytes.len()
            )));
        }

        let signing_key = SigningKey::from_slice(bytes).map_err(|e| {
            WalletError::InvalidKeyEncoding(format!("Invalid secret key bytes: {}", e))
        })?;
        let verifying_key = *signing_key.verifying_key();

        Ok(KeyPair {
            signing_key,
            verifying_key,
        })
    }

    /// Creates a KeyPair from a hex-encoded secret scalar.
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        let bytes = hex::decode(secret_hex)
            .map_err(|e| WalletError::InvalidKeyEncoding(format!("Invalid hex: {}", e)))?;
        Self::from_secret_bytes(&bytes)
    }

    /// Returns the secret scalar as fixed-width big-endian bytes.
    ///
    /// **Security**: handle with care; never log or transmit these bytes.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        let mut out = [0u8; SECRET_KEY_SIZE];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// Returns the public key as uncompressed affine coordinates `x || y`.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let point = self.verifying_key.to_encoded_point(false);
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        // Skip the leading SEC1 0x04 tag byte.
        out.copy_from_slice(&point.as_bytes()[1..]);
        out
    }

    /// Hex view of the secret scalar.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.secret_key_bytes())
    }

    /// Hex view of the public key coordinates.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// Signs a message with a fresh random nonce and returns the fixed-width
    /// `r || s` signature bytes. The message is hashed with SHA-256 before
    /// signing, so two calls over the same message produce different but
    /// equally valid signatures.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
        let signature: Signature = self
            .signing_key
            .try_sign_with_rng(&mut OsRng, message)
            .map_err(|e| WalletError::CryptoError(format!("Signing failed: {}", e)))?;
        Ok(signature_to_bytes(&signature))
    }

    /// Signs a message with an RFC 6979 deterministic nonce.
    ///
    /// Same digest and key always yield the same signature bytes; used where
    /// bit-exact reproducibility matters (golden vectors, audits).
    pub fn sign_deterministic(&self, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE]> {
        let signature: Signature = self
            .signing_key
            .try_sign(message)
            .map_err(|e| WalletError::CryptoError(format!("Signing failed: {}", e)))?;
        Ok(signature_to_bytes(&signature))
    }
}

fn signature_to_bytes(signature: &Signature) -> [u8; SIGNATURE_SIZE] {
    let mut out = [0u8; SIGNATURE_SIZE];
    out.copy_from_slice(&signature.to_bytes());
    out
}

/// Reconstructs a verifying key from uncompressed `x || y` coordinate bytes.
pub fn verifying_key_from_bytes(public_key_bytes: &[u8]) -> Result<VerifyingKey> {
    if public_key_bytes.len() != PUBLIC_KEY_SIZE {
        return Err(WalletError::InvalidInputLength(format!(
            "Public key must be exactly {} bytes (x || y), got {}",
            PUBLIC_KEY_SIZE,
            public_key_bytes.len()
        )));
    }

    let point = EncodedPoint::from_untagged_bytes(GenericArray::from_slice(public_key_bytes));
    VerifyingKey::from_encoded_point(&point)
        .map_err(|e| WalletError::InvalidKeyEncoding(format!("Invalid public key: {}", e)))
}

/// Verifies an ECDSA signature given the raw public key bytes, message, and
/// `r || s` signature bytes.
///
/// Returns `Ok(false)` for a well-formed signature that does not verify.
/// Malformed inputs (wrong lengths, components outside `[1, order-1]`) are
/// reported as errors instead.
pub fn verify_signature(
    public_key_bytes: &[u8],
    message: &[u8],
    signature_bytes: &[u8],
) -> Result<bool> {
    if signature_bytes.len() != SIGNATURE_SIZE {
        return Err(WalletError::MalformedSignature(format!(
            "Signature must be exactly {} bytes (r || s), got {}",
            SIGNATURE_SIZE,
            signature_bytes.len()
        )));
    }

    let verifying_key = verifying_key_from_bytes(public_key_bytes)?;

    let signature = Signature::from_slice(signature_bytes).map_err(|e| {
        WalletError::MalformedSignature(format!("Signature components out of range: {}", e))
    })?;

    Ok(verifying_key.verify(message, &signature).is_ok())
}
