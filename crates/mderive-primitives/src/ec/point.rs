//! secp256k1 curve points.
//!
//! The curve is `y^2 = x^3 + 7` over the field prime `P`, with group order
//! `N`. Points travel between layers in the 33-byte SEC1 compressed form.

use std::ops::Add;

use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::subtle::Choice;
use k256::{AffinePoint, FieldBytes, ProjectivePoint};

use crate::ec::scalar::scalar_from_bytes;
use crate::PrimitivesError;

/// Length of a compressed point (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Compressed prefix for an even y-coordinate.
const PREFIX_EVEN: u8 = 0x02;

/// Compressed prefix for an odd y-coordinate.
const PREFIX_ODD: u8 = 0x03;

/// A point on secp256k1, possibly the point at infinity.
///
/// Only non-identity points have a compressed encoding; `compress` reports
/// the identity as `InvalidPointEncoding`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint(ProjectivePoint);

impl CurvePoint {
    /// The point at infinity.
    pub const IDENTITY: Self = CurvePoint(ProjectivePoint::IDENTITY);

    /// The standard base point G.
    pub const GENERATOR: Self = CurvePoint(ProjectivePoint::GENERATOR);

    /// Multiply the base point by a 32-byte big-endian scalar.
    ///
    /// The scalar is read modulo `N`. A scalar congruent to zero yields the
    /// identity.
    pub fn mul_base(scalar: &[u8; 32]) -> Self {
        CurvePoint(ProjectivePoint::GENERATOR * scalar_from_bytes(scalar))
    }

    /// Add two points.
    ///
    /// The underlying formulas are complete, so equal operands and the
    /// identity are both handled.
    pub fn add_point(&self, other: &CurvePoint) -> Self {
        CurvePoint(self.0 + other.0)
    }

    /// Whether this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.0.is_identity().into()
    }

    /// Serialize as `0x02|0x03 || X`, the prefix carrying the parity of Y.
    ///
    /// # Returns
    /// The 33-byte encoding, or `InvalidPointEncoding` for the identity.
    pub fn compress(&self) -> Result<[u8; COMPRESSED_LEN], PrimitivesError> {
        if self.is_identity() {
            return Err(PrimitivesError::InvalidPointEncoding);
        }
        let encoded = self.0.to_affine().to_encoded_point(true);
        let bytes = encoded.as_bytes();
        if bytes.len() != COMPRESSED_LEN {
            return Err(PrimitivesError::InvalidPointEncoding);
        }
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Recover a point from its 33-byte compressed encoding.
    ///
    /// Y is the square root of `X^3 + 7 mod P` whose parity matches the
    /// prefix byte.
    ///
    /// # Returns
    /// The point, or `InvalidPointEncoding` if the length or prefix is
    /// wrong, X is not a canonical field element, or `X^3 + 7` has no
    /// square root.
    pub fn decompress(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != COMPRESSED_LEN {
            return Err(PrimitivesError::InvalidPointEncoding);
        }
        let y_is_odd = match bytes[0] {
            PREFIX_EVEN => Choice::from(0),
            PREFIX_ODD => Choice::from(1),
            _ => return Err(PrimitivesError::InvalidPointEncoding),
        };
        let mut x = [0u8; 32];
        x.copy_from_slice(&bytes[1..]);
        let affine: Option<AffinePoint> =
            AffinePoint::decompress(&FieldBytes::from(x), y_is_odd).into();
        let point = affine
            .map(ProjectivePoint::from)
            .ok_or(PrimitivesError::InvalidPointEncoding)?;
        let point = CurvePoint(point);
        if point.is_identity() {
            return Err(PrimitivesError::InvalidPointEncoding);
        }
        Ok(point)
    }
}

impl Add for CurvePoint {
    type Output = CurvePoint;

    fn add(self, rhs: CurvePoint) -> CurvePoint {
        self.add_point(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const TWO_G_COMPRESSED: &str =
        "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";
    const THREE_G_COMPRESSED: &str =
        "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9";

    fn scalar(n: u8) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[31] = n;
        out
    }

    #[test]
    fn test_mul_base_one_is_generator() {
        let p = CurvePoint::mul_base(&scalar(1));
        assert_eq!(p, CurvePoint::GENERATOR);
        assert_eq!(hex::encode(p.compress().unwrap()), G_COMPRESSED);
    }

    #[test]
    fn test_add_matches_multiplication() {
        let g = CurvePoint::GENERATOR;
        let two_g = g.add_point(&g);
        assert_eq!(hex::encode(two_g.compress().unwrap()), TWO_G_COMPRESSED);
        assert_eq!(two_g, CurvePoint::mul_base(&scalar(2)));

        let three_g = two_g + g;
        assert_eq!(hex::encode(three_g.compress().unwrap()), THREE_G_COMPRESSED);
    }

    #[test]
    fn test_zero_scalar_is_identity() {
        let p = CurvePoint::mul_base(&[0u8; 32]);
        assert_eq!(p, CurvePoint::IDENTITY);
        assert!(p.is_identity());
        assert_eq!(p.compress(), Err(PrimitivesError::InvalidPointEncoding));
    }

    #[test]
    fn test_decompress_roundtrip_both_parities() {
        for n in 1..=16u8 {
            let p = CurvePoint::mul_base(&scalar(n));
            let compressed = p.compress().unwrap();
            assert_eq!(CurvePoint::decompress(&compressed).unwrap(), p);
        }
    }

    #[test]
    fn test_decompress_flipped_prefix_negates() {
        let g = CurvePoint::GENERATOR;
        let mut bytes = g.compress().unwrap();
        bytes[0] = PREFIX_ODD;
        let neg = CurvePoint::decompress(&bytes).unwrap();
        assert_ne!(neg, g);
        assert!((neg + g).is_identity());
    }

    #[test]
    fn test_decompress_rejects_bad_prefix_and_length() {
        let mut bytes = hex::decode(G_COMPRESSED).unwrap();
        assert_eq!(
            CurvePoint::decompress(&bytes[..32]),
            Err(PrimitivesError::InvalidPointEncoding)
        );
        bytes[0] = 0x04;
        assert_eq!(
            CurvePoint::decompress(&bytes),
            Err(PrimitivesError::InvalidPointEncoding)
        );
    }

    #[test]
    fn test_decompress_rejects_x_off_curve() {
        // x = 5 gives x^3 + 7 = 132, a quadratic non-residue mod P.
        let mut bytes = [0u8; 33];
        bytes[0] = PREFIX_EVEN;
        bytes[32] = 5;
        assert_eq!(
            CurvePoint::decompress(&bytes),
            Err(PrimitivesError::InvalidPointEncoding)
        );
    }

    #[test]
    fn test_decompress_rejects_x_above_field_prime() {
        let mut bytes = [0xffu8; 33];
        bytes[0] = PREFIX_EVEN;
        assert_eq!(
            CurvePoint::decompress(&bytes),
            Err(PrimitivesError::InvalidPointEncoding)
        );
    }
}
