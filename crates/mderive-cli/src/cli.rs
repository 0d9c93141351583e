use clap::{Args, Parser, Subcommand};
use mderive::{DerivationPath, ExtendedKey, MnemonicLength, BIP85_BASE_PATH};

#[derive(Parser)]
#[command(
    name = "mderive",
    about = "M-Derive is a derivation tool to manage multiple mnemonics",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    New(NewArgs),

    Derive(DeriveArgs),

    Seed(SeedArgs),

    Inspect(InspectArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Generate a new mnemonic")]
pub(crate) struct NewArgs {
    #[arg(
        short,
        long,
        env = "MDERIVE_LENGTH",
        default_value = "12",
        value_parser = parse_length,
        help = "number of words: 12, 15, 18, 21 or 24"
    )]
    pub(crate) length: MnemonicLength,
}

/// The master mnemonic and its optional passphrase.
#[derive(Args, Debug, Clone)]
pub(crate) struct MasterArgs {
    #[arg(
        short,
        long,
        env = "MDERIVE_MNEMONIC",
        hide_env_values = true,
        help = "the master mnemonic"
    )]
    pub(crate) mnemonic: String,

    #[arg(
        short = 'e',
        long,
        env = "MDERIVE_PASSPHRASE",
        hide_env_values = true,
        default_value = "",
        help = "the master mnemonic's passphrase"
    )]
    pub(crate) passphrase: String,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive child mnemonics from a master mnemonic")]
pub(crate) struct DeriveArgs {
    #[clap(flatten)]
    pub(crate) master: MasterArgs,

    #[arg(
        short,
        long,
        env = "MDERIVE_LENGTH",
        default_value = "12",
        value_parser = parse_length,
        help = "number of words in each derived mnemonic"
    )]
    pub(crate) length: MnemonicLength,

    #[arg(
        short,
        long,
        env = "MDERIVE_PATH",
        default_value = BIP85_BASE_PATH,
        value_parser = parse_path,
        help = "base derivation path; the child index is appended"
    )]
    pub(crate) path: DerivationPath,

    #[arg(
        short = 'n',
        long,
        env = "MDERIVE_COUNT",
        default_value_t = 1,
        help = "number of mnemonics to derive, indices 0..count"
    )]
    pub(crate) count: u32,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Print the seed and master key of a mnemonic")]
pub(crate) struct SeedArgs {
    #[clap(flatten)]
    pub(crate) master: MasterArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Decode an extended key and optionally derive a path from it")]
pub(crate) struct InspectArgs {
    #[arg(value_parser = parse_key, help = "an xprv or xpub key")]
    pub(crate) key: ExtendedKey,

    #[arg(
        short,
        long,
        env = "MDERIVE_PATH",
        value_parser = parse_path,
        help = "path to derive before printing"
    )]
    pub(crate) path: Option<DerivationPath>,
}

fn parse_length(s: &str) -> Result<MnemonicLength, String> {
    let words: usize = s.parse().map_err(|e| format!("{e}"))?;
    MnemonicLength::from_word_count(words).map_err(|e| e.to_string())
}

fn parse_path(s: &str) -> Result<DerivationPath, String> {
    s.parse().map_err(|e: mderive::HdError| e.to_string())
}

fn parse_key(s: &str) -> Result<ExtendedKey, String> {
    s.parse().map_err(|e: mderive::HdError| e.to_string())
}
