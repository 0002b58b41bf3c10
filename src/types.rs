//! Type aliases shared across the crate.

use hmac::Hmac;
use sha2::Sha512;

/// Size in bytes of private keys, seeds and chain codes.
pub const KEY_SIZE: usize = 32;

/// HMAC with SHA-512, the keyed hash behind every derivation step.
pub type HmacSha512 = Hmac<Sha512>;

/// Chain code bytes accompanying each branch of an extended key.
pub type ChainCode = [u8; KEY_SIZE];

/// Depth in the key derivation hierarchy.
pub type Depth = u8;

/// Truncated hash of a public key, identifying the parent of a derived key.
pub type KeyFingerprint = [u8; 4];

/// Raw private key or seed bytes.
pub type PrivateKeyBytes = [u8; KEY_SIZE];

/// Compressed secp256k1 public key: SEC1 parity tag plus x coordinate.
pub type PublicKeyBytes = [u8; KEY_SIZE + 1];

/// Raw ed25519 public key bytes.
pub type Ed25519PublicKeyBytes = [u8; KEY_SIZE];

/// Expanded ed25519 keypair bytes: the 32-byte seed followed by the
/// 32-byte public key.
pub type Ed25519KeypairBytes = [u8; KEY_SIZE * 2];
