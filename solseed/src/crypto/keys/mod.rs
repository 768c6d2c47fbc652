//! Key derivation and management
//!
//! This module provides hardened SLIP-0010 derivation and the Solana keypair
//! built from each derived seed.

pub mod solana;
mod derivation;

pub use derivation::*;
pub use solana::Keypair;
