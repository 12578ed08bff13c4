//! Wallet identity: a key pair plus its derived address.

use crate::address::derive_address;
use crate::crypto::KeyPair;
use crate::error::Result;
use crate::transaction::TransferTx;
use tracing::debug;

/// An account identity. The address is derived once at creation from the
/// public key bytes and never changes afterwards.
#[derive(Clone)]
pub struct Wallet {
    keypair: KeyPair,
    address: String,
}

impl Wallet {
    /// Creates a wallet with a freshly generated key pair.
    pub fn new() -> Result<Self> {
        let keypair = KeyPair::generate()?;
        Self::from_keypair(keypair)
    }

    /// Rebuilds a wallet from exported secret scalar bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_keypair(KeyPair::from_secret_bytes(bytes)?)
    }

    /// Rebuilds a wallet from a hex-encoded secret scalar.
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        Self::from_keypair(KeyPair::from_secret_hex(secret_hex)?)
    }

    fn from_keypair(keypair: KeyPair) -> Result<Self> {
        let address = derive_address(&keypair.public_key_bytes())?;
        debug!(%address, "wallet ready");
        Ok(Wallet { keypair, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Hex view of the secret scalar. Handle with care.
    pub fn secret_key_hex(&self) -> String {
        self.keypair.secret_key_hex()
    }

    /// Hex view of the public key coordinates.
    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key_hex()
    }

    /// Builds an unsigned transfer from this wallet to a recipient address.
    pub fn new_transfer(&self, recipient_address: &str, amount: f64) -> TransferTx {
        TransferTx::new(
            self.keypair.public_key_bytes().to_vec(),
            self.address.clone(),
            recipient_address.to_string(),
            amount,
        )
    }
}
