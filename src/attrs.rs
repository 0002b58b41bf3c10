use crate::{
    types::{Depth, KeyFingerprint},
    ChildNumber,
};
use borsh::{BorshDeserialize, BorshSerialize};

/// Extended key attributes: derivation metadata shared by both curve
/// branches of an [`ExtendedKey`](crate::ExtendedKey).
#[derive(Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct ExtendedKeyAttrs {
    /// Depth in the key derivation hierarchy.
    pub depth: Depth,

    /// Fingerprint of the parent's secp256k1 public key.
    pub parent_fingerprint: KeyFingerprint,

    /// Child number used to derive this key from its parent.
    pub child_number: ChildNumber,
}
