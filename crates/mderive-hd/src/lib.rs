/// mderive - Hierarchical deterministic keys.
///
/// BIP-32 extended keys with private and public child derivation, the
/// 82-byte serialized form, derivation paths, and BIP-85 style entropy for
/// deriving child mnemonics from a parent key.

mod error;
pub use error::HdError;

pub mod key;
pub mod path;
pub mod serializer;
pub mod entropy;

pub use entropy::{derive_entropy, derive_mnemonic, derive_mnemonics, BIP85_BASE_PATH};
pub use key::ExtendedKey;
pub use path::{derive_from_path_str, ChildNumber, DerivationPath};
