/// Elliptic curve arithmetic on secp256k1.
///
/// Provides the point operations and scalar arithmetic that hierarchical
/// key derivation is built from. All field and scalar math is delegated to
/// `k256`, whose types are fixed-width and constant time.

pub mod point;
pub mod scalar;

pub use point::{CurvePoint, COMPRESSED_LEN};
pub use scalar::{add_scalars, is_valid_private_key, SCALAR_LEN};
