//! Extended keys: master key initialization, single-step child derivation
//! and path walking over both curve branches.

use core::fmt::{self, Debug};

use ed25519_dalek::{SigningKey, VerifyingKey};
use hmac::Mac;
use ripemd::Ripemd160;
use secp256k1::{Scalar, SecretKey};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::{result::Result, secp, types::*, ChildNumber, DerivationPath, Error, ExtendedKeyAttrs};

/// Derivation domain separator for the secp256k1 master key.
const SECP256K1_DOMAIN_SEPARATOR: &[u8] = b"Bitcoin seed";

/// Derivation domain separator for the ed25519 master key.
const ED25519_DOMAIN_SEPARATOR: &[u8] = b"ed25519 seed";

/// secp256k1 state of an extended key.
#[derive(Clone)]
struct SecpBranch {
    /// Derived secret key.
    secret_key: SecretKey,

    /// Chain code for this branch.
    chain_code: ChainCode,

    /// Compressed public key, computed once at construction.
    public_key: PublicKeyBytes,
}

impl SecpBranch {
    fn new(secret_key: SecretKey, chain_code: ChainCode) -> Self {
        let public_key = secp::compressed_public_key(&secret_key);
        Self { secret_key, chain_code, public_key }
    }
}

/// ed25519 state of an extended key.
#[derive(Clone)]
struct Ed25519Branch {
    /// Derived signing key, expanded from the 32-byte branch seed.
    signing_key: SigningKey,

    /// Chain code for this branch.
    chain_code: ChainCode,

    /// Public key of `signing_key`.
    verifying_key: VerifyingKey,
}

impl Ed25519Branch {
    fn new(signing_key: SigningKey, chain_code: ChainCode) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self { signing_key, chain_code, verifying_key }
    }
}

/// One node of the dual-curve derivation tree.
///
/// Holds independent secp256k1 and ed25519 key material derived from the
/// same root seed and the same index sequence. The two branches share
/// nothing beyond that: each has its own chain code and its own derivation
/// rule. Values are immutable; derivation produces a new key and never
/// mutates the parent.
#[derive(Clone)]
pub struct ExtendedKey {
    secp: SecpBranch,
    ed25519: Ed25519Branch,
    attrs: ExtendedKeyAttrs,
}

impl ExtendedKey {
    /// Minimum number of seed bytes accepted by [`ExtendedKey::new`].
    pub const MIN_SEED_BYTES: usize = 16;

    /// Maximum number of seed bytes accepted by [`ExtendedKey::new`].
    pub const MAX_SEED_BYTES: usize = 64;

    /// Maximum derivation depth.
    pub const MAX_DEPTH: Depth = u8::MAX;

    /// Create the root extended key for the given seed value.
    ///
    /// Each branch is seeded from its own domain-separated
    /// `HMAC-SHA512(separator, seed)`: the left half becomes key material,
    /// the right half the chain code.
    pub fn new<S>(seed: S) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        let seed = seed.as_ref();
        if seed.len() < Self::MIN_SEED_BYTES || seed.len() > Self::MAX_SEED_BYTES {
            return Err(Error::SeedLength);
        }

        let mut hmac = HmacSha512::new_from_slice(SECP256K1_DOMAIN_SEPARATOR)?;
        hmac.update(seed);
        let result = hmac.finalize().into_bytes();
        let (secret_key, chain_code) = result.split_at(KEY_SIZE);
        let secp = SecpBranch::new(SecretKey::from_slice(secret_key)?, chain_code.try_into()?);

        let mut hmac = HmacSha512::new_from_slice(ED25519_DOMAIN_SEPARATOR)?;
        hmac.update(seed);
        let result = hmac.finalize().into_bytes();
        let (seed, chain_code) = result.split_at(KEY_SIZE);
        let ed25519 = Ed25519Branch::new(SigningKey::from_bytes(seed.try_into()?), chain_code.try_into()?);

        Ok(ExtendedKey { secp, ed25519, attrs: ExtendedKeyAttrs::default() })
    }

    /// Derive the child key for a particular [`ChildNumber`].
    ///
    /// Both branches advance from the same index in one call. A failure on
    /// the secp256k1 branch aborts the whole step so the two trees stay in
    /// lock-step over a path.
    pub fn derive_child(&self, child_number: ChildNumber) -> Result<Self> {
        let depth = self.attrs.depth.checked_add(1).ok_or(Error::Depth)?;

        // secp256k1: hardened children commit to the parent secret,
        // normal children to the parent public key.
        let mut hmac = HmacSha512::new_from_slice(&self.secp.chain_code)?;
        if child_number.is_hardened() {
            hmac.update(&[0]);
            hmac.update(&self.secp.secret_key.secret_bytes());
        } else {
            hmac.update(&self.secp.public_key);
        }
        hmac.update(&child_number.to_bytes());

        let result = hmac.finalize().into_bytes();
        let (tweak, chain_code) = result.split_at(KEY_SIZE);

        // `from_slice` rejects IL = 0 and IL >= the group order, and
        // `add_tweak` rejects a sum that reduces to zero. Per BIP32 the
        // odds are below 1 in 2^127, so rather than skipping to the next
        // index we report the child as invalid and let the caller retry.
        let parent_scalar = Scalar::from(self.secp.secret_key);
        let secret_key = SecretKey::from_slice(tweak)
            .and_then(|tweak| tweak.add_tweak(&parent_scalar))
            .map_err(|_| Error::InvalidChild)?;
        let secp = SecpBranch::new(secret_key, chain_code.try_into()?);

        // ed25519: always the hardened-style form, keyed on the parent
        // seed, with the index used verbatim. The HMAC output is the new
        // seed directly, so every index yields a valid child.
        let mut hmac = HmacSha512::new_from_slice(&self.ed25519.chain_code)?;
        hmac.update(&[0]);
        hmac.update(&self.ed25519.signing_key.to_bytes());
        hmac.update(&child_number.to_bytes());

        let result = hmac.finalize().into_bytes();
        let (seed, chain_code) = result.split_at(KEY_SIZE);
        let ed25519 = Ed25519Branch::new(SigningKey::from_bytes(seed.try_into()?), chain_code.try_into()?);

        let attrs = ExtendedKeyAttrs { depth, parent_fingerprint: self.fingerprint(), child_number };

        Ok(ExtendedKey { secp, ed25519, attrs })
    }

    /// Fold [`ExtendedKey::derive_child`] over a [`DerivationPath`],
    /// threading the evolving key. The first failing step short-circuits.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        path.iter().try_fold(self.clone(), |key, child_number| key.derive_child(child_number))
    }

    /// Borrow the derived secp256k1 secret key.
    pub fn secp256k1_secret_key(&self) -> &SecretKey {
        &self.secp.secret_key
    }

    /// Serialize the secp256k1 secret key as a fixed-width big-endian
    /// byte array.
    pub fn secp256k1_secret_bytes(&self) -> PrivateKeyBytes {
        self.secp.secret_key.secret_bytes()
    }

    /// Chain code of the secp256k1 branch.
    pub fn secp256k1_chain_code(&self) -> &ChainCode {
        &self.secp.chain_code
    }

    /// Compressed secp256k1 public key.
    pub fn secp256k1_public_key(&self) -> &PublicKeyBytes {
        &self.secp.public_key
    }

    /// Borrow the derived ed25519 signing key.
    pub fn ed25519_signing_key(&self) -> &SigningKey {
        &self.ed25519.signing_key
    }

    /// The 32-byte ed25519 branch seed.
    pub fn ed25519_seed(&self) -> PrivateKeyBytes {
        self.ed25519.signing_key.to_bytes()
    }

    /// Chain code of the ed25519 branch.
    pub fn ed25519_chain_code(&self) -> &ChainCode {
        &self.ed25519.chain_code
    }

    /// Expanded ed25519 keypair bytes: seed followed by public key.
    pub fn ed25519_keypair_bytes(&self) -> Ed25519KeypairBytes {
        self.ed25519.signing_key.to_keypair_bytes()
    }

    /// Borrow the derived ed25519 verifying key.
    pub fn ed25519_verifying_key(&self) -> &VerifyingKey {
        &self.ed25519.verifying_key
    }

    /// Raw ed25519 public key bytes.
    pub fn ed25519_public_key(&self) -> Ed25519PublicKeyBytes {
        self.ed25519.verifying_key.to_bytes()
    }

    /// Get attributes for this key such as depth, parent fingerprint and
    /// child number.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    /// Compute the 4-byte fingerprint of this key's secp256k1 public key.
    pub fn fingerprint(&self) -> KeyFingerprint {
        let digest = Ripemd160::digest(Sha256::digest(self.secp.public_key));
        digest[..4].try_into().expect("digest truncated")
    }
}

impl ConstantTimeEq for ExtendedKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut secp_a = self.secp256k1_secret_bytes();
        let mut secp_b = other.secp256k1_secret_bytes();
        let mut ed_a = self.ed25519_seed();
        let mut ed_b = other.ed25519_seed();

        let result = secp_a.ct_eq(&secp_b)
            & ed_a.ct_eq(&ed_b)
            & self.secp.chain_code.ct_eq(&other.secp.chain_code)
            & self.ed25519.chain_code.ct_eq(&other.ed25519.chain_code)
            & self.attrs.depth.ct_eq(&other.attrs.depth)
            & self.attrs.parent_fingerprint.ct_eq(&other.attrs.parent_fingerprint)
            & self.attrs.child_number.0.ct_eq(&other.attrs.child_number.0);

        secp_a.zeroize();
        secp_b.zeroize();
        ed_a.zeroize();
        ed_b.zeroize();

        result
    }
}

/// NOTE: uses [`ConstantTimeEq`] internally
impl Eq for ExtendedKey {}

/// NOTE: uses [`ConstantTimeEq`] internally
impl PartialEq for ExtendedKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("secp256k1", &"...")
            .field("ed25519", &"...")
            .field("attrs", &self.attrs)
            .finish()
    }
}
