//! Wallet configuration
//!
//! Values come from defaults, environment variables, or a serialized form
//! supplied by the embedding application.

use serde::{Deserialize, Serialize};

use crate::crypto::keys::{HARDENED_OFFSET, SOLANA_COIN_TYPE};
use crate::crypto::mnemonic::MnemonicStrength;
use crate::error::{Error, Result};

/// Session configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Number of words for newly generated phrases
    pub word_count: usize,
    /// SLIP-44 coin type used in account paths
    pub coin_type: u32,
    /// First account index handed out by a new session
    pub start_index: u32,
    /// Optional BIP-39 passphrase
    #[serde(skip_serializing)]
    pub passphrase: String,
    /// Prefix for generated account names
    pub name_prefix: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            word_count: 12,
            coin_type: SOLANA_COIN_TYPE,
            start_index: 0,
            passphrase: String::new(),
            name_prefix: "Wallet".to_string(),
        }
    }
}

impl WalletConfig {
    /// Load configuration from `SOLSEED_*` environment variables, falling
    /// back to defaults for unset ones
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            word_count: parse_var(&lookup, "SOLSEED_WORD_COUNT")?.unwrap_or(defaults.word_count),
            coin_type: parse_var(&lookup, "SOLSEED_COIN_TYPE")?.unwrap_or(defaults.coin_type),
            start_index: parse_var(&lookup, "SOLSEED_START_INDEX")?.unwrap_or(defaults.start_index),
            passphrase: lookup("SOLSEED_PASSPHRASE").unwrap_or(defaults.passphrase),
            name_prefix: lookup("SOLSEED_NAME_PREFIX").unwrap_or(defaults.name_prefix),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every value can be used for derivation
    pub fn validate(&self) -> Result<()> {
        self.strength()?;

        if self.coin_type >= HARDENED_OFFSET {
            return Err(Error::Config(format!("Coin type {} out of range", self.coin_type)));
        }
        if self.start_index >= HARDENED_OFFSET {
            return Err(Error::Config(format!("Start index {} out of range", self.start_index)));
        }
        Ok(())
    }

    /// Mnemonic strength for the configured word count
    pub fn strength(&self) -> Result<MnemonicStrength> {
        MnemonicStrength::from_word_count(self.word_count)
            .map_err(|_| Error::Config(format!("Unsupported word count: {}", self.word_count)))
    }
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("word_count", &self.word_count)
            .field("coin_type", &self.coin_type)
            .field("start_index", &self.start_index)
            .field("passphrase", &if self.passphrase.is_empty() { "" } else { "<redacted>" })
            .field("name_prefix", &self.name_prefix)
            .finish()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}
