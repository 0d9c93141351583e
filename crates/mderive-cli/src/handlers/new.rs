use std::io::Write;

use anyhow::Result;
use mderive::{Mnemonic, WordList};
use tracing::info;

use crate::cli::NewArgs;

pub(crate) fn handle_new(args: NewArgs, out: &mut impl Write) -> Result<()> {
    let mnemonic = Mnemonic::generate(&WordList::english(), args.length);
    info!(words = args.length.word_count(), "generated mnemonic");
    writeln!(out, "{}", mnemonic.phrase())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use mderive::MnemonicLength;

    use super::*;

    #[test]
    fn test_prints_valid_phrase() {
        let mut out = Vec::new();
        handle_new(NewArgs { length: MnemonicLength::Words15 }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mnemonic = Mnemonic::parse(&WordList::english(), text.trim()).unwrap();
        assert_eq!(mnemonic.length(), MnemonicLength::Words15);
    }
}
