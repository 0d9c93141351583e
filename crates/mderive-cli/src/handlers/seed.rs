use std::io::Write;

use anyhow::{Context, Result};
use mderive::primitives::bip39::seed_from_mnemonic_checked;
use mderive::{ExtendedKey, WordList};

use crate::cli::SeedArgs;

pub(crate) fn handle_seed(args: SeedArgs, out: &mut impl Write) -> Result<()> {
    let seed = seed_from_mnemonic_checked(
        &WordList::english(),
        &args.master.mnemonic,
        &args.master.passphrase,
    )
    .context("invalid master mnemonic")?;
    let master = ExtendedKey::new_master(seed.as_bytes());

    writeln!(out, "seed: {}", seed.to_hex())?;
    writeln!(out, "xprv: {master}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::MasterArgs;

    #[test]
    fn test_prints_seed_and_master() {
        let args = SeedArgs {
            master: MasterArgs {
                mnemonic: "wedding dizzy input hollow steak pig rural chimney foam sketch survey coyote ready material bulb".to_string(),
                passphrase: String::new(),
            },
        };
        let mut out = Vec::new();
        handle_seed(args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("seed: 0f218c27"));
        assert!(text.contains(
            "xprv: xprv9s21ZrQH143K32mLvbGNtzZsMdpY2bHJo5v5Eh6yxgbSLYHWT8kj7imgkDh7WjCByYsmu18vZcqTjbUVP2HxNMqGNqKdWM76PvxiYzYJ5hK"
        ));
    }
}
