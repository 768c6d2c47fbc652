//! SLIP-0010 hierarchical derivation over ed25519
//!
//! Only hardened children are defined for ed25519, so every path segment is
//! hardened and no public-parent derivation exists.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use sha2::Sha512;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Offset applied to hardened child indices
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP-44 purpose level
pub const PURPOSE: u32 = 44;

/// SLIP-44 coin type for Solana
pub const SOLANA_COIN_TYPE: u32 = 501;

/// HMAC key used to derive the master node
const MASTER_HMAC_KEY: &[u8] = b"ed25519 seed";

/// A hardened child index, stored without the hardened offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildIndex(u32);

impl ChildIndex {
    /// Build a hardened index; `index` must be below 2^31
    pub fn hardened(index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(Error::InvalidPath(format!(
                "Child index {} exceeds the hardened range",
                index
            )));
        }
        Ok(Self(index))
    }

    /// Index as written in the path, without the hardened offset
    pub fn index(&self) -> u32 {
        self.0
    }

    /// Index as serialized into the HMAC input
    pub fn to_u32(&self) -> u32 {
        self.0 | HARDENED_OFFSET
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'", self.0)
    }
}

/// An ordered, non-empty list of hardened child indices
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    pub fn new(segments: Vec<ChildIndex>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::InvalidPath("Derivation path is empty".to_string()));
        }
        Ok(Self(segments))
    }

    /// Build `m/44'/coin_type'/account'/0'`
    pub fn account(coin_type: u32, account: u32) -> Result<Self> {
        Self::new(vec![
            ChildIndex::hardened(PURPOSE)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
            ChildIndex::hardened(0)?,
        ])
    }

    /// Build the Solana account path `m/44'/501'/account'/0'`
    pub fn solana(account: u32) -> Result<Self> {
        Self::account(SOLANA_COIN_TYPE, account)
    }

    pub fn segments(&self) -> &[ChildIndex] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    /// Parse `m/44'/501'/0'/0'`; `h` is accepted as hardened marker too
    fn from_str(path: &str) -> Result<Self> {
        parse_path(path.trim()).map_err(|e| {
            warn!("rejected derivation path: {}", e);
            e
        })
    }
}

fn parse_path(path: &str) -> Result<DerivationPath> {
    let rest = path
        .strip_prefix("m/")
        .ok_or_else(|| Error::InvalidPath(format!("Path must start with 'm/': {}", path)))?;

    let mut segments = Vec::new();
    for component in rest.split('/') {
        let digits = component
            .strip_suffix('\'')
            .or_else(|| component.strip_suffix('h'))
            .ok_or_else(|| {
                Error::InvalidPath(format!(
                    "Segment '{}' is not hardened; ed25519 derivation requires hardened segments",
                    component
                ))
            })?;

        // u32::from_str also takes a leading '+'
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPath(format!(
                "Invalid derivation path component: {}",
                component
            )));
        }

        let index = digits.parse::<u32>().map_err(|_| {
            Error::InvalidPath(format!("Invalid derivation path component: {}", component))
        })?;
        segments.push(ChildIndex::hardened(index)?);
    }

    DerivationPath::new(segments)
}

/// A node in the derivation tree: 32-byte key and 32-byte chain code
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl ExtendedKey {
    pub fn key(&self) -> &[u8; 32] {
        &self.key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Derive the hardened child at `index`
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        let mut hmac = HmacSha512::new_from_slice(&self.chain_code)
            .map_err(|_| Error::InvalidPath("HMAC error".to_string()))?;

        // 0x00 || parent key || ser32(index)
        hmac.update(&[0u8]);
        hmac.update(&self.key);
        hmac.update(&index.to_u32().to_be_bytes());

        Ok(Self::split(hmac.finalize().into_bytes().as_slice()))
    }

    fn split(output: &[u8]) -> Self {
        let mut buf = [0u8; 64];
        buf.copy_from_slice(output);

        let mut node = Self {
            key: [0u8; 32],
            chain_code: [0u8; 32],
        };
        node.key.copy_from_slice(&buf[..32]);
        node.chain_code.copy_from_slice(&buf[32..]);
        buf.zeroize();
        node
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExtendedKey(<redacted>)")
    }
}

/// 32-byte secret produced by walking a path; consumed by keypair construction
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedSeed([u8; 32]);

impl DerivedSeed {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for DerivedSeed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DerivedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedSeed(<redacted>)")
    }
}

/// Derive the master node from a seed
pub fn derive_master_key(seed: &[u8]) -> Result<ExtendedKey> {
    let mut hmac = HmacSha512::new_from_slice(MASTER_HMAC_KEY)
        .map_err(|_| Error::InvalidPath("HMAC error".to_string()))?;

    hmac.update(seed);
    Ok(ExtendedKey::split(hmac.finalize().into_bytes().as_slice()))
}

/// Walk `path` from the master node of `seed` and return the final key
pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<DerivedSeed> {
    let mut node = derive_master_key(seed)?;
    for &index in path.segments() {
        // the previous node is zeroized when overwritten
        node = node.derive_child(index)?;
    }

    debug!(path = %path, "derived child key");
    Ok(DerivedSeed(*node.key()))
}
