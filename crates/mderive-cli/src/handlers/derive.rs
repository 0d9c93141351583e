use std::io::Write;

use anyhow::{Context, Result};
use mderive::{derive_mnemonic, ChildNumber, WordList};
use tracing::info;

use super::master_key;
use crate::cli::DeriveArgs;

/// Print one `path: phrase` line per index in `0..count`.
pub(crate) fn handle_derive(args: DeriveArgs, out: &mut impl Write) -> Result<()> {
    let list = WordList::english();
    let master = master_key(&list, &args.master)?;

    info!(base = %args.path, count = args.count, "deriving mnemonics");
    for index in 0..args.count {
        let mnemonic = derive_mnemonic(&master, &args.path, index, args.length, &list)
            .with_context(|| format!("failed to derive mnemonic {index}"))?;
        let path = args.path.child(ChildNumber::normal(index)?);
        writeln!(out, "{path}: {}", mnemonic.phrase())?;
    }
    Ok(())
}
