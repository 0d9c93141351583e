//! Deterministic sub-entropy (BIP-85 style).
//!
//! A private node's key is fed through HMAC-SHA512 keyed with
//! `"bip-entropy-from-k"`; the 64-byte output is the entropy for a child
//! secret such as a fresh mnemonic.

use tracing::debug;
use zeroize::Zeroizing;

use mderive_primitives::bip39::{entropy_to_mnemonic, Mnemonic, MnemonicLength, WordList};
use mderive_primitives::hash::sha512_hmac;

use crate::error::HdError;
use crate::key::ExtendedKey;
use crate::path::{ChildNumber, DerivationPath};

/// HMAC key for entropy derivation.
const ENTROPY_HMAC_KEY: &[u8] = b"bip-entropy-from-k";

/// Length of derived entropy in bytes.
pub const ENTROPY_LEN: usize = 64;

/// Conventional base path for entropy derivation. Callers pass a path
/// explicitly; this is only the usual choice.
pub const BIP85_BASE_PATH: &str = "m/83696968'/0'/0'";

/// Derive the node at `path` and hash its private key into 64 bytes.
///
/// # Returns
/// `PrivateKeyRequired` if `key` is public, otherwise any error from
/// deriving `path`.
pub fn derive_entropy(
    key: &ExtendedKey,
    path: &DerivationPath,
) -> Result<Zeroizing<[u8; ENTROPY_LEN]>, HdError> {
    if !key.is_private() {
        return Err(HdError::PrivateKeyRequired);
    }
    let node = key.derive_path(path)?;
    let k = node.private_key_bytes().ok_or(HdError::PrivateKeyRequired)?;
    Ok(Zeroizing::new(sha512_hmac(ENTROPY_HMAC_KEY, k)))
}

/// Derive a mnemonic of `length` words from `base/index`.
///
/// The first `length.entropy_bytes()` bytes of the derived entropy are
/// encoded with `list`.
pub fn derive_mnemonic(
    key: &ExtendedKey,
    base: &DerivationPath,
    index: u32,
    length: MnemonicLength,
    list: &WordList,
) -> Result<Mnemonic, HdError> {
    let path = base.child(ChildNumber::normal(index)?);
    let entropy = derive_entropy(key, &path)?;
    let mnemonic = entropy_to_mnemonic(list, &entropy[..length.entropy_bytes()])?;
    debug!(%path, words = length.word_count(), "derived mnemonic");
    Ok(mnemonic)
}

/// Derive one mnemonic per index below the same base path.
///
/// Stops at the first failing index.
pub fn derive_mnemonics<I>(
    key: &ExtendedKey,
    base: &DerivationPath,
    indices: I,
    length: MnemonicLength,
    list: &WordList,
) -> Result<Vec<Mnemonic>, HdError>
where
    I: IntoIterator<Item = u32>,
{
    indices
        .into_iter()
        .map(|index| derive_mnemonic(key, base, index, length, list))
        .collect()
}
