//! Cryptographic primitives and operations
//!
//! This module provides functionality for mnemonic generation, key derivation,
//! and keypair construction required for wallet management.

pub mod mnemonic;
pub mod keys;

pub use mnemonic::*;
pub use keys::*;
