#![deny(missing_docs)]

//! mderive - Derive many mnemonics from one.
//!
//! Re-exports the mderive components for single-crate usage: a master
//! mnemonic becomes a BIP-32 key tree, and BIP-85 style entropy taken from
//! that tree becomes independent child mnemonics.

pub use mderive_hd as hd;
pub use mderive_primitives as primitives;

pub use mderive_hd::{
    derive_entropy, derive_from_path_str, derive_mnemonic, derive_mnemonics, ChildNumber,
    DerivationPath, ExtendedKey, HdError, BIP85_BASE_PATH,
};
pub use mderive_primitives::bip39::{Mnemonic, MnemonicLength, Seed, WordList};
pub use mderive_primitives::PrimitivesError;
