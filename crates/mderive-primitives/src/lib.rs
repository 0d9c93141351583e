/// mderive - Cryptographic primitives for deterministic key derivation.
///
/// This crate provides the building blocks shared by the HD key layer:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160, HMAC-SHA512)
/// - Base58 encoding/decoding
/// - secp256k1 point and scalar arithmetic
/// - BIP-39 mnemonic encoding, validation and seed derivation

pub mod hash;
pub mod base58;
pub mod ec;
pub mod bip39;

mod error;
pub use error::PrimitivesError;
