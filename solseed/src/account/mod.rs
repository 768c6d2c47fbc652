//! Account management functionality
//!
//! This module provides the wallet session: one mnemonic, its master seed,
//! and the sequencer that derives successive accounts from it.

mod sequencer;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use zeroize::Zeroize;

use crate::config::WalletConfig;
use crate::crypto::keys::{solana, Keypair};
use crate::crypto::mnemonic::{
    export_phrase, generate_mnemonic, mnemonic_to_seed, parse_mnemonic, MasterSeed, Mnemonic,
};
use crate::error::Result;

pub use sequencer::AccountSequencer;

/// Placeholder shown instead of a hidden secret key
pub const MASKED_SECRET: &str = "••••••••••••";

/// A derived account as handed to the display layer
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// Account index in the derivation path
    pub index: u32,
    /// Human-readable name
    pub display_name: String,
    /// Base58 public key
    pub public_key: String,
    /// Hex-encoded 64-byte secret key
    pub secret_key: String,
    /// Path the keypair was derived from
    pub derivation_path: String,
    /// Balance in lamports; the core never queries it
    pub balance: u64,
    /// Display-layer flag; the core only initializes it
    pub revealed: bool,
}

impl WalletAccount {
    /// Secret key if revealed, otherwise the masked placeholder
    pub fn visible_secret(&self) -> &str {
        if self.revealed {
            &self.secret_key
        } else {
            MASKED_SECRET
        }
    }

    /// Rebuild the keypair from the encoded secret key
    pub fn keypair(&self) -> Result<Keypair> {
        solana::decode_secret(&self.secret_key)
    }
}

impl fmt::Debug for WalletAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletAccount")
            .field("index", &self.index)
            .field("display_name", &self.display_name)
            .field("public_key", &self.public_key)
            .field("secret_key", &MASKED_SECRET)
            .field("derivation_path", &self.derivation_path)
            .field("balance", &self.balance)
            .field("revealed", &self.revealed)
            .finish()
    }
}

/// A wallet session: the mnemonic, its seed, and the account counter.
///
/// Derived accounts are handed to the caller and not kept; the mnemonic and
/// seed are zeroized when the session is dropped.
pub struct Session {
    mnemonic: Mnemonic,
    seed: MasterSeed,
    sequencer: AccountSequencer,
    name_prefix: String,
    created: usize,
}

impl Session {
    /// Start a session with a freshly generated mnemonic
    pub fn create(config: &WalletConfig) -> Result<Self> {
        config.validate()?;
        let mnemonic = generate_mnemonic(config.strength()?)?;
        info!(words = mnemonic.word_count(), "created new session");
        Ok(Self::from_mnemonic(mnemonic, config))
    }

    /// Start a session from an existing phrase
    pub fn restore(phrase: &str, config: &WalletConfig) -> Result<Self> {
        config.validate()?;
        let mnemonic = parse_mnemonic(phrase)?;
        info!(words = mnemonic.word_count(), "restored session");
        Ok(Self::from_mnemonic(mnemonic, config))
    }

    fn from_mnemonic(mnemonic: Mnemonic, config: &WalletConfig) -> Self {
        let seed = mnemonic_to_seed(&mnemonic, &config.passphrase);
        Self {
            mnemonic,
            seed,
            sequencer: AccountSequencer::new(config.start_index).with_coin_type(config.coin_type),
            name_prefix: config.name_prefix.clone(),
            created: 0,
        }
    }

    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    /// Space-joined phrase for display or copy
    pub fn export_phrase(&self) -> String {
        export_phrase(&self.mnemonic)
    }

    /// Derive the next account, named `"{prefix} {n}"` where `n` counts the
    /// accounts created in this session
    pub fn create_account(&mut self) -> Result<WalletAccount> {
        let ordinal = self.created + 1;
        let prefix = &self.name_prefix;
        let account = self
            .sequencer
            .next_account(&self.seed, |_| format!("{} {}", prefix, ordinal))?;

        self.created = ordinal;
        Ok(account)
    }

    /// Number of accounts created in this session
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn sequencer(&self) -> &AccountSequencer {
        &self.sequencer
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("sequencer", &self.sequencer)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.mnemonic.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_session_creation() {
        let mut session = Session::create(&WalletConfig::default()).unwrap();
        assert_eq!(session.export_phrase().split(' ').count(), 12);

        let first = session.create_account().unwrap();
        let second = session.create_account().unwrap();

        assert_eq!(first.display_name, "Wallet 1");
        assert_eq!(second.display_name, "Wallet 2");
        assert_eq!((first.index, second.index), (0, 1));
        assert_ne!(first.public_key, second.public_key);
        assert_eq!(session.created(), 2);
    }

    fn assert_zeroize<T: Zeroize>() {}

    #[test]
    fn test_session_secrets_are_zeroizable() {
        // Session::drop relies on these bounds
        assert_zeroize::<Mnemonic>();
        assert_zeroize::<MasterSeed>();
    }

    #[test]
    fn test_session_does_not_keep_derived_secrets() {
        let mut session = Session::restore(ABANDON, &WalletConfig::default()).unwrap();
        let accounts: Vec<WalletAccount> = (0..3).map(|_| session.create_account().unwrap()).collect();

        assert_eq!(session.created(), 3);
        assert_eq!(session.sequencer().next_index(), 3);

        let rendered = format!("{:?}", session);
        for account in &accounts {
            assert!(!rendered.contains(&account.secret_key));
            assert!(!rendered.contains(&account.secret_key[..16]));
        }
    }

    #[test]
    fn test_restore_is_deterministic() {
        let config = WalletConfig::default();
        let mut a = Session::restore(ABANDON, &config).unwrap();
        let mut b = Session::restore(ABANDON, &config).unwrap();

        assert_eq!(a.create_account().unwrap(), b.create_account().unwrap());
        assert_eq!(a.export_phrase(), ABANDON);
    }

    #[test]
    fn test_passphrase_changes_accounts() {
        let plain = WalletConfig::default();
        let mut protected = WalletConfig::default();
        protected.passphrase = "TREZOR".to_string();

        let mut a = Session::restore(ABANDON, &plain).unwrap();
        let mut b = Session::restore(ABANDON, &protected).unwrap();
        assert_ne!(
            a.create_account().unwrap().public_key,
            b.create_account().unwrap().public_key
        );
    }

    #[test]
    fn test_names_follow_prefix_and_start_index() {
        let mut config = WalletConfig::default();
        config.start_index = 3;
        config.name_prefix = "Account".to_string();

        let mut session = Session::restore(ABANDON, &config).unwrap();
        let account = session.create_account().unwrap();
        assert_eq!(account.index, 3);
        assert_eq!(account.display_name, "Account 1");
    }

    #[test]
    fn test_restore_rejects_bad_checksum() {
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        let err = Session::restore(bad, &WalletConfig::default()).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_visible_secret_and_debug() {
        let mut session = Session::restore(ABANDON, &WalletConfig::default()).unwrap();
        let mut account = session.create_account().unwrap();

        assert_eq!(account.visible_secret(), MASKED_SECRET);
        assert!(!format!("{:?}", account).contains(&account.secret_key));
        assert!(!format!("{:?}", session).contains(ABANDON));

        account.revealed = true;
        assert_eq!(account.visible_secret(), account.secret_key);
        assert_eq!(solana::encode_public(&account.keypair().unwrap()), account.public_key);
    }
}
