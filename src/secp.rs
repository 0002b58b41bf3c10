//! secp256k1 curve helpers.

use crate::types::{PublicKeyBytes, KEY_SIZE};
use secp256k1::{PublicKey, SecretKey};

/// Multiply the secp256k1 generator by `key`, returning the affine
/// coordinates of the resulting point as fixed-width big-endian buffers.
pub fn scalar_base_multiply(key: &SecretKey) -> ([u8; KEY_SIZE], [u8; KEY_SIZE]) {
    let point = PublicKey::from_secret_key_global(key).serialize_uncompressed();

    let mut x = [0u8; KEY_SIZE];
    let mut y = [0u8; KEY_SIZE];
    x.copy_from_slice(&point[1..33]);
    y.copy_from_slice(&point[33..65]);

    (x, y)
}

/// SEC1 point compression: a parity byte (`0x02` for even y, `0x03` for
/// odd) followed by the 32-byte x coordinate. The fixed-width coordinate
/// buffers keep short x values left-padded with zeros.
pub fn compress(x: &[u8; KEY_SIZE], y: &[u8; KEY_SIZE]) -> PublicKeyBytes {
    let mut bytes = [0u8; KEY_SIZE + 1];
    bytes[0] = 0x02 + (y[KEY_SIZE - 1] & 1);
    bytes[1..].copy_from_slice(x);
    bytes
}

/// Compressed public key for the given secret key.
pub(crate) fn compressed_public_key(key: &SecretKey) -> PublicKeyBytes {
    let (x, y) = scalar_base_multiply(key);
    compress(&x, &y)
}

#[cfg(test)]
mod tests {
    use super::{compress, compressed_public_key, scalar_base_multiply};
    use secp256k1::{PublicKey, SecretKey};

    fn secret_key(fill: u8) -> SecretKey {
        SecretKey::from_slice(&[fill; 32]).unwrap()
    }

    #[test]
    fn compress_matches_sec1_serialization() {
        for fill in [0x01, 0x02, 0x7f, 0xc9] {
            let key = secret_key(fill);
            let expected = PublicKey::from_secret_key_global(&key).serialize();
            assert_eq!(compressed_public_key(&key), expected);
        }
    }

    #[test]
    fn compress_round_trip() {
        let key = secret_key(0x42);
        let (x, y) = scalar_base_multiply(&key);

        let point = PublicKey::from_slice(&compress(&x, &y)).unwrap();
        let uncompressed = point.serialize_uncompressed();

        assert_eq!(&uncompressed[1..33], &x);
        assert_eq!(&uncompressed[33..65], &y);
    }
}
