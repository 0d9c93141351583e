//! Scalar arithmetic modulo the secp256k1 group order.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar, U256};

/// Length of a serialized scalar (private key) in bytes.
pub const SCALAR_LEN: usize = 32;

/// Interpret 32 big-endian bytes as a scalar, reducing modulo `N`.
pub(crate) fn scalar_from_bytes(bytes: &[u8; SCALAR_LEN]) -> Scalar {
    let uint = U256::from_be_slice(bytes);
    <Scalar as Reduce<U256>>::reduce(uint)
}

/// Whether 32 big-endian bytes are a usable private key: `0 < k < N`.
pub fn is_valid_private_key(bytes: &[u8; SCALAR_LEN]) -> bool {
    let scalar: Option<Scalar> = Scalar::from_repr(FieldBytes::from(*bytes)).into();
    scalar.is_some_and(|s| s != Scalar::ZERO)
}

/// Compute `(a + b) mod N` over two big-endian 32-byte scalars.
///
/// This is the private half of child key derivation: the parent key plus
/// the left half of the HMAC output.
pub fn add_scalars(a: &[u8; SCALAR_LEN], b: &[u8; SCALAR_LEN]) -> [u8; SCALAR_LEN] {
    let sum = scalar_from_bytes(a) + scalar_from_bytes(b);
    sum.to_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// N - 1, the largest valid scalar.
    const N_MINUS_ONE: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140";

    /// The group order N.
    const N_HEX: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    fn small(n: u8) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[31] = n;
        out
    }

    fn from_hex(s: &str) -> [u8; 32] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_add_small_scalars() {
        assert_eq!(add_scalars(&small(2), &small(3)), small(5));
    }

    #[test]
    fn test_add_wraps_modulo_order() {
        let n_minus_one = from_hex(N_MINUS_ONE);
        assert_eq!(add_scalars(&n_minus_one, &small(2)), small(1));
        assert_eq!(add_scalars(&n_minus_one, &small(1)), [0u8; 32]);
    }

    #[test]
    fn test_add_keeps_leading_zero_bytes() {
        let a = from_hex("00000000000000000000000000000000000000000000000000000000000000ff");
        let sum = add_scalars(&a, &small(1));
        assert_eq!(sum.len(), SCALAR_LEN);
        assert_eq!(hex::encode(sum), format!("{}0100", "00".repeat(30)));
    }

    #[test]
    fn test_private_key_range() {
        assert!(is_valid_private_key(&small(1)));
        assert!(is_valid_private_key(&from_hex(N_MINUS_ONE)));
        assert!(!is_valid_private_key(&[0u8; 32]));
        assert!(!is_valid_private_key(&from_hex(N_HEX)));
        assert!(!is_valid_private_key(&[0xff; 32]));
    }

    #[test]
    fn test_inputs_above_order_are_reduced() {
        // N itself reduces to zero.
        let n = from_hex(N_HEX);
        assert_eq!(add_scalars(&n, &small(7)), small(7));
    }
}
