//! Hierarchical deterministic key derivation over two curve families.
//!
//! A single root seed is expanded into two domain-separated master keys, one
//! for secp256k1 (BIP32-style ECDSA derivation) and one for ed25519
//! (SLIP10-style seed chaining). Both trees are walked in lock-step: every
//! [`ExtendedKey`] node carries key material for both branches, and a single
//! derivation step advances both from the same child index.
//!
//! Serialization of extended keys into versioned base58 strings, mnemonic
//! handling and signing are left to downstream consumers of the accessors
//! exposed by [`ExtendedKey`].

mod attrs;
mod child_number;
mod derivation_path;
mod error;
mod extended_key;
mod result;
mod secp;
pub mod types;

pub use attrs::ExtendedKeyAttrs;
pub use child_number::ChildNumber;
pub use derivation_path::DerivationPath;
pub use error::Error;
pub use extended_key::ExtendedKey;
pub use result::Result;
pub use secp::{compress, scalar_base_multiply};
pub use types::*;
