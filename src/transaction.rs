//! Transfer transactions and canonical signing.
//!
//! A transfer binds `{sender_blockchain_address, recipient_blockchain_address,
//! value}` to the sender's key. The three fields are serialized canonically
//! before hashing: field names sorted lexicographically, each rendered as a
//! `name:value` pair, pairs joined by `,`. The amount is rendered with Rust's
//! shortest round-trip `{:?}` formatting (`1.0`, `2.5`, `0.1`), which is
//! locale-independent and byte-for-byte reproducible, so any implementation
//! that follows the same layout produces the same digest.

use crate::crypto::{self, KeyPair, SIGNATURE_SIZE};
use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A signed or yet-unsigned transfer of value between two addresses.
///
/// Immutable once signed in spirit: mutating any field invalidates the
/// attached signature, which binds only the two addresses and the amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTx {
    pub sender_public_key: Vec<u8>,
    pub sender_address: String,
    pub recipient_address: String,
    pub amount: f64,
    pub signature: Option<String>,
}

impl TransferTx {
    pub fn new(
        sender_public_key: Vec<u8>,
        sender_address: String,
        recipient_address: String,
        amount: f64,
    ) -> Self {
        TransferTx {
            sender_public_key,
            sender_address,
            recipient_address,
            amount,
            signature: None,
        }
    }

    /// The canonical byte serialization of the signable fields.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_transfer_bytes(&self.sender_address, &self.recipient_address, self.amount)
    }

    /// SHA-256 digest of the canonical serialization.
    pub fn digest(&self) -> [u8; 32] {
        transfer_digest(&self.sender_address, &self.recipient_address, self.amount)
    }

    /// Signs the transfer with a fresh random nonce, attaches the signature,
    /// and returns it as a 128-character hex string.
    pub fn sign(&mut self, keypair: &KeyPair) -> Result<String> {
        let signature = keypair.sign(&self.canonical_bytes())?;
        let signature_hex = hex::encode(signature);
        self.signature = Some(signature_hex.clone());
        Ok(signature_hex)
    }

    /// Signs the transfer with an RFC 6979 deterministic nonce. Same inputs
    /// always produce the same signature bytes.
    pub fn sign_deterministic(&mut self, keypair: &KeyPair) -> Result<String> {
        let signature = keypair.sign_deterministic(&self.canonical_bytes())?;
        let signature_hex = hex::encode(signature);
        self.signature = Some(signature_hex.clone());
        Ok(signature_hex)
    }

    /// Verifies the attached signature against the sender's public key and the
    /// current field values.
    pub fn verify(&self) -> Result<bool> {
        let signature_hex = self.signature.as_deref().ok_or_else(|| {
            WalletError::MalformedSignature("Transfer is not signed".to_string())
        })?;
        let signature_bytes = decode_signature_hex(signature_hex)?;

        crypto::verify_signature(
            &self.sender_public_key,
            &self.canonical_bytes(),
            &signature_bytes,
        )
    }
}

/// Canonical serialization of the signable transfer fields.
///
/// Field names sorted lexicographically:
/// `recipient_blockchain_address` < `sender_blockchain_address` < `value`.
pub fn canonical_transfer_bytes(
    sender_address: &str,
    recipient_address: &str,
    amount: f64,
) -> Vec<u8> {
    format!(
        "recipient_blockchain_address:{},sender_blockchain_address:{},value:{:?}",
        recipient_address, sender_address, amount
    )
    .into_bytes()
}

/// SHA-256 digest of the canonical transfer serialization.
pub fn transfer_digest(sender_address: &str, recipient_address: &str, amount: f64) -> [u8; 32] {
    Sha256::digest(canonical_transfer_bytes(
        sender_address,
        recipient_address,
        amount,
    ))
    .into()
}

/// Signs a transfer on behalf of the ledger-facing API and returns the
/// signature as a 128-character hex string.
pub fn sign_transfer(
    sender_address: &str,
    recipient_address: &str,
    amount: f64,
    private_key_bytes: &[u8],
) -> Result<String> {
    let keypair = KeyPair::from_secret_bytes(private_key_bytes)?;
    let signature = keypair.sign(&canonical_transfer_bytes(
        sender_address,
        recipient_address,
        amount,
    ))?;
    Ok(hex::encode(signature))
}

/// Verifies a hex-encoded transfer signature against the sender's public key
/// bytes and the transfer fields.
pub fn verify_transfer(
    signature_hex: &str,
    sender_address: &str,
    recipient_address: &str,
    amount: f64,
    public_key_bytes: &[u8],
) -> Result<bool> {
    let signature_bytes = decode_signature_hex(signature_hex)?;
    crypto::verify_signature(
        public_key_bytes,
        &canonical_transfer_bytes(sender_address, recipient_address, amount),
        &signature_bytes,
    )
}

fn decode_signature_hex(signature_hex: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(signature_hex)
        .map_err(|e| WalletError::MalformedSignature(format!("Invalid hex: {}", e)))?;
    if bytes.len() != SIGNATURE_SIZE {
        return Err(WalletError::MalformedSignature(format!(
            "Signature must be {} bytes (r || s), got {}",
            SIGNATURE_SIZE,
            bytes.len()
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "1NveUeFwrzqB6QE6X7QFU6pYuSMaosdYNx";
    const RECIPIENT: &str = "13pcJPHEChzScpVbwtauZEvTJZnxuKabYL";

    fn test_keypair() -> KeyPair {
        let secret: [u8; 32] = [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
            0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c,
            0x1d, 0x1e, 0x1f, 0x20,
        ];
        KeyPair::from_secret_bytes(&secret).unwrap()
    }

    #[test]
    fn test_canonical_field_order_and_format() {
        let bytes = canonical_transfer_bytes("addrA", "addrB", 1.0);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "recipient_blockchain_address:addrB,sender_blockchain_address:addrA,value:1.0"
        );
    }

    #[test]
    fn test_amount_formatting_is_stable() {
        let render = |amount: f64| {
            String::from_utf8(canonical_transfer_bytes("s", "r", amount)).unwrap()
        };
        assert!(render(1.0).ends_with("value:1.0"));
        assert!(render(2.5).ends_with("value:2.5"));
        assert!(render(0.1).ends_with("value:0.1"));
        assert!(render(0.0).ends_with("value:0.0"));
    }

    #[test]
    fn test_construction_order_does_not_change_digest() {
        let keypair = test_keypair();
        let tx1 = TransferTx::new(
            keypair.public_key_bytes().to_vec(),
            SENDER.to_string(),
            RECIPIENT.to_string(),
            1.0,
        );
        let tx2 = TransferTx {
            amount: 1.0,
            recipient_address: RECIPIENT.to_string(),
            signature: None,
            sender_address: SENDER.to_string(),
            sender_public_key: keypair.public_key_bytes().to_vec(),
        };

        assert_eq!(tx1.canonical_bytes(), tx2.canonical_bytes());
        assert_eq!(tx1.digest(), tx2.digest());
    }

    #[test]
    fn test_known_digest() {
        let digest = transfer_digest(SENDER, RECIPIENT, 1.0);
        assert_eq!(
            hex::encode(digest),
            "feb03908a04b811a6ac6b5215775633ad2cbeb1e8509afbd425fd75ea2dce147"
        );
    }

    #[test]
    fn test_known_deterministic_signature() {
        let keypair = test_keypair();
        let mut tx = TransferTx::new(
            keypair.public_key_bytes().to_vec(),
            SENDER.to_string(),
            RECIPIENT.to_string(),
            1.0,
        );

        let signature_hex = tx.sign_deterministic(&keypair).unwrap();
        assert_eq!(
            signature_hex,
            "752f1a1e72cc1a995610c07b076bbed73164dfc81efba16b923d73c8170e401e\
             af518ba76bb427073ef0b5c42469de1a14a5d6fa9dc9a04906974d423ecb6b82"
        );
        assert!(tx.verify().unwrap());
    }

    #[test]
    fn test_sign_and_verify() {
        let keypair = test_keypair();
        let mut tx = TransferTx::new(
            keypair.public_key_bytes().to_vec(),
            SENDER.to_string(),
            RECIPIENT.to_string(),
            1.0,
        );

        let signature_hex = tx.sign(&keypair).unwrap();
        assert_eq!(signature_hex.len(), SIGNATURE_SIZE * 2);
        assert_eq!(tx.signature.as_deref(), Some(signature_hex.as_str()));
        assert!(tx.verify().unwrap());
    }

    #[test]
    fn test_tampering_invalidates_signature() {
        let keypair = test_keypair();
        let mut tx = TransferTx::new(
            keypair.public_key_bytes().to_vec(),
            SENDER.to_string(),
            RECIPIENT.to_string(),
            1.0,
        );
        tx.sign(&keypair).unwrap();
        assert!(tx.verify().unwrap());

        let mut changed_amount = tx.clone();
        changed_amount.amount = 2.0;
        assert!(!changed_amount.verify().unwrap());

        let mut changed_recipient = tx.clone();
        changed_recipient.recipient_address = SENDER.to_string();
        assert!(!changed_recipient.verify().unwrap());

        let mut changed_sender = tx.clone();
        changed_sender.sender_address = RECIPIENT.to_string();
        assert!(!changed_sender.verify().unwrap());
    }

    #[test]
    fn test_unsigned_transfer_verify_errors() {
        let keypair = test_keypair();
        let tx = TransferTx::new(
            keypair.public_key_bytes().to_vec(),
            SENDER.to_string(),
            RECIPIENT.to_string(),
            1.0,
        );
        assert!(matches!(
            tx.verify(),
            Err(WalletError::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_flat_api_round_trip() {
        let keypair = test_keypair();
        let signature_hex =
            sign_transfer(SENDER, RECIPIENT, 1.0, &keypair.secret_key_bytes()).unwrap();

        let verified = verify_transfer(
            &signature_hex,
            SENDER,
            RECIPIENT,
            1.0,
            &keypair.public_key_bytes(),
        )
        .unwrap();
        assert!(verified);

        let tampered = verify_transfer(
            &signature_hex,
            SENDER,
            RECIPIENT,
            2.0,
            &keypair.public_key_bytes(),
        )
        .unwrap();
        assert!(!tampered);
    }

    #[test]
    fn test_malformed_signature_hex_rejected() {
        let keypair = test_keypair();
        let pubkey = keypair.public_key_bytes();

        let result = verify_transfer("not-hex", SENDER, RECIPIENT, 1.0, &pubkey);
        assert!(matches!(result, Err(WalletError::MalformedSignature(_))));

        let result = verify_transfer("abcd", SENDER, RECIPIENT, 1.0, &pubkey);
        assert!(matches!(result, Err(WalletError::MalformedSignature(_))));
    }
}
