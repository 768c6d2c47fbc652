//! Solseed - deterministic Solana HD wallet key derivation
//!
//! This library turns a single BIP-39 mnemonic into an unbounded, reproducible
//! sequence of ed25519 keypairs, one per hardened account index on the path
//! `m/44'/501'/account'/0'` (SLIP-0010).
//!
//! ```
//! use solseed::{Session, WalletConfig};
//!
//! let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
//! let mut session = Session::restore(phrase, &WalletConfig::default())?;
//! let account = session.create_account()?;
//! assert_eq!(account.index, 0);
//! # Ok::<(), solseed::Error>(())
//! ```

pub mod error;
pub mod config;
pub mod crypto;
pub mod account;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use config::WalletConfig;
pub use account::{AccountSequencer, Session, WalletAccount};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
