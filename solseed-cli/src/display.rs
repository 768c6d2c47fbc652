//! Account rendering and reveal state
//!
//! Whether a secret key is shown is a display concern: the core only hands out
//! accounts with `revealed = false`, and this module keeps the per-account flag.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use solseed::account::MASKED_SECRET;
use solseed::WalletAccount;

/// Reveal flag per account index
#[derive(Debug, Default)]
pub struct RevealState {
    revealed: HashMap<u32, bool>,
}

impl RevealState {
    /// Flip the flag for `index` and return the new value
    pub fn toggle(&mut self, index: u32) -> bool {
        let entry = self.revealed.entry(index).or_insert(false);
        *entry = !*entry;
        if *entry {
            warn!(index, "revealing secret key: never share your private key with anyone");
        }
        *entry
    }

    pub fn is_revealed(&self, index: u32) -> bool {
        self.revealed.get(&index).copied().unwrap_or(false)
    }

    /// Copy the flags onto the accounts
    pub fn apply(&self, accounts: &mut [WalletAccount]) {
        for account in accounts {
            account.revealed = self.is_revealed(account.index);
        }
    }
}

/// Serialized form of an account; the secret is masked unless revealed
#[derive(Debug, Serialize)]
pub struct AccountView<'a> {
    pub index: u32,
    pub name: &'a str,
    pub path: &'a str,
    pub public_key: &'a str,
    pub secret_key: &'a str,
    pub balance: u64,
}

impl<'a> From<&'a WalletAccount> for AccountView<'a> {
    fn from(account: &'a WalletAccount) -> Self {
        Self {
            index: account.index,
            name: &account.display_name,
            path: &account.derivation_path,
            public_key: &account.public_key,
            secret_key: account.visible_secret(),
            balance: account.balance,
        }
    }
}

/// Render an account as a text card
pub fn render_card(account: &WalletAccount) -> String {
    format!(
        "{name} ({balance} lamports)\n  Path:        {path}\n  Public Key:  {public}\n  Private Key: {secret}",
        name = account.display_name,
        balance = account.balance,
        path = account.derivation_path,
        public = account.public_key,
        secret = account.visible_secret(),
    )
}

/// Render the recovery phrase, or a mask when hidden
pub fn render_phrase(phrase: &str, show: bool) -> String {
    if show {
        format!("Your Secret Recovery Phrase:\n  {}", phrase)
    } else {
        format!("Your Secret Recovery Phrase:\n  {}", MASKED_SECRET)
    }
}
