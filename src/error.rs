//! Error type.

use thiserror::Error;

/// Error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Child number with the hardened bit already set.
    #[error("invalid child number")]
    ChildNumber,

    /// Cryptographic errors from the secp256k1 backend.
    #[error(transparent)]
    Crypto(#[from] secp256k1::Error),

    /// Byte buffer of unexpected length.
    #[error("decoding error")]
    Decode,

    /// Malformed derivation path.
    #[error("invalid derivation path: {0}")]
    DerivationPath(String),

    /// Maximum derivation depth exceeded.
    #[error("maximum derivation depth exceeded")]
    Depth,

    /// HMAC key of invalid length.
    #[error("hmac error: {0}")]
    Hmac(#[from] hmac::digest::InvalidLength),

    /// The extended key at the requested index is invalid.
    #[error("the extended key at this index is invalid")]
    InvalidChild,

    /// Seed byte length outside the accepted range.
    #[error("invalid seed length")]
    SeedLength,
}

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Error {
        Error::Decode
    }
}
