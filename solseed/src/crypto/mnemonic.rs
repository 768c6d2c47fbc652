//! Mnemonic phrase generation and handling

use std::fmt;

pub use bip39::Mnemonic;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Length of a BIP-39 seed in bytes
pub const MASTER_SEED_LEN: usize = 64;

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    Words12,
    /// 15 words (160 bits)
    Words15,
    /// 18 words (192 bits)
    Words18,
    /// 21 words (224 bits)
    Words21,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Get entropy length in bits
    pub fn entropy_bits(&self) -> usize {
        match self {
            Self::Words12 => 128,
            Self::Words15 => 160,
            Self::Words18 => 192,
            Self::Words21 => 224,
            Self::Words24 => 256,
        }
    }

    /// Get entropy length in bytes
    fn entropy_bytes(&self) -> usize {
        self.entropy_bits() / 8
    }

    /// Number of words in a phrase of this strength
    pub fn word_count(&self) -> usize {
        // every 32 bits of entropy carry one checksum bit; 11 bits per word
        (self.entropy_bits() + self.entropy_bits() / 32) / 11
    }

    pub fn from_word_count(words: usize) -> Result<Self> {
        match words {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            other => Err(Error::Mnemonic(format!("Unsupported word count: {}", other))),
        }
    }

    pub fn from_entropy_bits(bits: usize) -> Result<Self> {
        match bits {
            128 => Ok(Self::Words12),
            160 => Ok(Self::Words15),
            192 => Ok(Self::Words18),
            224 => Ok(Self::Words21),
            256 => Ok(Self::Words24),
            other => Err(Error::Mnemonic(format!("Unsupported entropy size: {} bits", other))),
        }
    }
}

impl Default for MnemonicStrength {
    fn default() -> Self {
        Self::Words12
    }
}

/// BIP-39 seed derived from a mnemonic and passphrase.
///
/// Zeroed when dropped. Shared read-only by every path derivation of a session.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterSeed([u8; MASTER_SEED_LEN]);

impl MasterSeed {
    /// Wrap raw seed bytes
    pub fn from_bytes(bytes: [u8; MASTER_SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw seed bytes
    pub fn as_bytes(&self) -> &[u8; MASTER_SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for MasterSeed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for MasterSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSeed(<redacted>)")
    }
}

/// Generate a new random mnemonic with the specified strength using the OS
/// randomness source
pub fn generate_mnemonic(strength: MnemonicStrength) -> Result<Mnemonic> {
    generate_mnemonic_with_rng(&mut OsRng, strength)
}

/// Generate a mnemonic drawing entropy from `rng`
pub fn generate_mnemonic_with_rng<R>(rng: &mut R, strength: MnemonicStrength) -> Result<Mnemonic>
where
    R: RngCore + CryptoRng,
{
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_bytes()]);
    rng.try_fill_bytes(&mut entropy)
        .map_err(|e| Error::EntropySource(e.to_string()))?;

    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| Error::Mnemonic(e.to_string()))?;

    debug!(words = strength.word_count(), "generated mnemonic");
    Ok(mnemonic)
}

/// Parse an externally supplied phrase.
///
/// Words are lowercased and runs of whitespace collapsed before lookup.
/// A phrase made of known words whose checksum does not match fails with
/// [`Error::Checksum`]; any other malformation fails with [`Error::Mnemonic`].
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic> {
    let normalized = Zeroizing::new(normalize_phrase(phrase));

    Mnemonic::parse_normalized(&normalized).map_err(|e| {
        warn!("rejected mnemonic: {}", e);
        match e {
            bip39::Error::InvalidChecksum => Error::Checksum(e.to_string()),
            other => Error::Mnemonic(other.to_string()),
        }
    })
}

/// Validate a mnemonic phrase
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse_mnemonic(phrase).is_ok()
}

/// Generate a seed from a mnemonic and optional passphrase
pub fn mnemonic_to_seed(mnemonic: &Mnemonic, passphrase: &str) -> MasterSeed {
    MasterSeed(mnemonic.to_seed(passphrase))
}

/// Space-joined words of the phrase, for display or backup
pub fn export_phrase(mnemonic: &Mnemonic) -> String {
    mnemonic.to_string()
}

fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
