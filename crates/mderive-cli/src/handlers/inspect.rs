use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::cli::InspectArgs;

pub(crate) fn handle_inspect(args: InspectArgs, out: &mut impl Write) -> Result<()> {
    let key = match &args.path {
        Some(path) => args.key.derive_path(path)?,
        None => args.key,
    };
    debug!(depth = key.depth(), private = key.is_private(), "inspecting key");

    writeln!(out, "type: {}", if key.is_private() { "private" } else { "public" })?;
    writeln!(out, "depth: {}", key.depth())?;
    writeln!(out, "child number: {}", key.child_number())?;
    writeln!(out, "parent fingerprint: {}", hex::encode(key.parent_fingerprint()))?;
    writeln!(out, "fingerprint: {}", hex::encode(key.fingerprint()?))?;
    writeln!(out, "chain code: {}", hex::encode(key.chain_code()))?;
    writeln!(out, "public key: {}", hex::encode(key.public_key_bytes()?))?;
    if key.is_private() {
        writeln!(out, "xprv: {key}")?;
    }
    writeln!(out, "xpub: {}", key.public_key()?)?;
    Ok(())
}
