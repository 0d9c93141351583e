/// Unified error type for all primitives operations.
///
/// Covers curve point decoding, mnemonic encoding and validation, and
/// Base58 text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid point encoding")]
    InvalidPointEncoding,

    #[error("invalid entropy length: {0} bits, expected 128, 160, 192, 224 or 256")]
    InvalidEntropyLength(usize),

    #[error("invalid mnemonic length: {0} words, expected 12, 15, 18, 21 or 24")]
    InvalidMnemonicLength(usize),

    #[error("unknown word in mnemonic: {0}")]
    UnknownWord(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid word list: {0}")]
    InvalidWordList(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),
}
