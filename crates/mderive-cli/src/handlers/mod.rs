pub(crate) mod derive;
pub(crate) mod inspect;
pub(crate) mod new;
pub(crate) mod seed;

use anyhow::{Context, Result};
use mderive::primitives::bip39::seed_from_mnemonic_checked;
use mderive::{ExtendedKey, WordList};

use crate::cli::MasterArgs;

/// Validate the master mnemonic and build its root key.
pub(crate) fn master_key(list: &WordList, args: &MasterArgs) -> Result<ExtendedKey> {
    let seed = seed_from_mnemonic_checked(list, &args.mnemonic, &args.passphrase)
        .context("invalid master mnemonic")?;
    Ok(ExtendedKey::new_master(seed.as_bytes()))
}
