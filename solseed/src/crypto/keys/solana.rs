//! Solana keypairs
//!
//! Converts a derived seed into an ed25519 signing keypair and defines the
//! display encodings: base58 for the public key, lowercase hex for the 64-byte
//! secret key (seed || public key).

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use super::derivation::DerivedSeed;

/// Length of an ed25519 seed
pub const SEED_LEN: usize = 32;

/// Length of an encoded public key
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of an encoded secret key (seed followed by public key)
pub const SECRET_KEY_LEN: usize = 64;

/// An ed25519 keypair
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Expand a 32-byte seed into a keypair
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let seed: &[u8; SEED_LEN] = seed.try_into().map_err(|_| Error::InvalidSeed {
            expected: SEED_LEN,
            actual: seed.len(),
        })?;

        Ok(Self {
            signing_key: SigningKey::from_bytes(seed),
        })
    }

    /// Build the keypair of a derived seed
    pub fn from_derived(seed: &DerivedSeed) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed.as_bytes()),
        }
    }

    /// Rebuild a keypair from its 64-byte secret key, checking that the
    /// public half belongs to the seed half
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; SECRET_KEY_LEN] = bytes.try_into().map_err(|_| Error::InvalidSeed {
            expected: SECRET_KEY_LEN,
            actual: bytes.len(),
        })?;

        let signing_key = SigningKey::from_keypair_bytes(bytes).map_err(|_| Error::KeyMismatch)?;
        Ok(Self { signing_key })
    }

    /// Get the 32-byte public key
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Get the 64-byte secret key
    pub fn secret_key(&self) -> Zeroizing<[u8; SECRET_KEY_LEN]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Verify a signature made by this keypair
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> bool {
        verify_signature(&self.public_key(), message, signature)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &encode_public(self))
            .finish_non_exhaustive()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.secret_key() == other.secret_key()
    }
}

impl Eq for Keypair {}

/// Verify an ed25519 signature against a raw public key
pub fn verify_signature(public_key: &[u8; PUBLIC_KEY_LEN], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(signature))
        .is_ok()
}

/// Encode the public key as base58 (the Solana address)
pub fn encode_public(keypair: &Keypair) -> String {
    bs58::encode(keypair.public_key()).into_string()
}

/// Encode the 64-byte secret key as lowercase hex
pub fn encode_secret(keypair: &Keypair) -> String {
    hex::encode(keypair.secret_key().as_slice())
}

/// Decode a base58 public key
pub fn decode_public(encoded: &str) -> Result<[u8; PUBLIC_KEY_LEN]> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| Error::Encoding(format!("Invalid base58 public key: {}", e)))?;

    bytes.as_slice().try_into().map_err(|_| {
        Error::Encoding(format!(
            "Invalid Solana public key length: {} (expected {})",
            bytes.len(),
            PUBLIC_KEY_LEN
        ))
    })
}

/// Decode a hex secret key back into its keypair
pub fn decode_secret(encoded: &str) -> Result<Keypair> {
    let bytes = Zeroizing::new(
        hex::decode(encoded).map_err(|e| Error::Encoding(format!("Invalid hex secret key: {}", e)))?,
    );
    if bytes.len() != SECRET_KEY_LEN {
        return Err(Error::Encoding(format!(
            "Invalid secret key length: {} (expected {})",
            bytes.len(),
            SECRET_KEY_LEN
        )));
    }

    Keypair::from_secret_bytes(&bytes)
}
