//! Sequential account derivation

use tracing::{debug, info};

use crate::crypto::keys::{derive_path, solana, DerivationPath, Keypair, HARDENED_OFFSET, SOLANA_COIN_TYPE};
use crate::crypto::mnemonic::MasterSeed;
use crate::error::{Error, Result};
use super::WalletAccount;

/// Hands out account indices `start, start + 1, ...` and derives the account
/// for each one.
///
/// `next_account` takes `&mut self`, so two derivations can never observe the
/// same counter value. Callers sharing a sequencer across threads wrap it in a
/// `Mutex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSequencer {
    next_index: u32,
    coin_type: u32,
}

impl Default for AccountSequencer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl AccountSequencer {
    /// Create a Solana sequencer whose first account is `start_index`
    pub fn new(start_index: u32) -> Self {
        Self {
            next_index: start_index,
            coin_type: SOLANA_COIN_TYPE,
        }
    }

    /// Use a different SLIP-44 coin type in account paths
    pub fn with_coin_type(mut self, coin_type: u32) -> Self {
        self.coin_type = coin_type;
        self
    }

    /// Index the next call to [`next_account`](Self::next_account) will use
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn coin_type(&self) -> u32 {
        self.coin_type
    }

    /// Path for account `index` under this sequencer's coin type
    pub fn path_for(&self, index: u32) -> Result<DerivationPath> {
        DerivationPath::account(self.coin_type, index)
    }

    /// Derive the keypair of account `index` without touching the counter
    pub fn keypair_at(&self, seed: &MasterSeed, index: u32) -> Result<Keypair> {
        let path = self.path_for(index)?;
        let derived = derive_path(seed.as_ref(), &path)?;
        Ok(Keypair::from_derived(&derived))
    }

    /// Derive the account at the current index and advance the counter.
    ///
    /// `display_name` receives the index being assigned. The counter only
    /// moves once the account has been built; once the hardened range is
    /// exhausted every call fails with [`Error::InvalidPath`].
    pub fn next_account<F>(&mut self, seed: &MasterSeed, display_name: F) -> Result<WalletAccount>
    where
        F: FnOnce(u32) -> String,
    {
        let index = self.next_index;
        if index >= HARDENED_OFFSET {
            return Err(Error::InvalidPath(format!(
                "Account index {} exceeds the hardened range",
                index
            )));
        }

        let path = self.path_for(index)?;
        debug!(index, path = %path, "deriving account");

        let keypair = Keypair::from_derived(&derive_path(seed.as_ref(), &path)?);
        let account = WalletAccount {
            index,
            display_name: display_name(index),
            public_key: solana::encode_public(&keypair),
            secret_key: solana::encode_secret(&keypair),
            derivation_path: path.to_string(),
            balance: 0,
            revealed: false,
        };

        self.next_index = index + 1;
        info!(index, public_key = %account.public_key, "created account");
        Ok(account)
    }
}
