//! BIP-39 mnemonic generation and seed derivation.
//!
//! Provides the entropy <-> mnemonic bijection with its embedded checksum,
//! validation of user-supplied phrases, and PBKDF2-based seed derivation.
//! Word lists are passed in explicitly; see [`WordList`].

pub mod wordlist;

pub use wordlist::{WordList, WORD_LIST_LEN};

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use tracing::debug;
use zeroize::Zeroizing;

use crate::hash::sha256;
use crate::PrimitivesError;

/// Bits encoded by one mnemonic word.
const BITS_PER_WORD: usize = 11;

/// PBKDF2 iteration count for seed derivation.
const PBKDF2_ROUNDS: u32 = 2048;

/// Salt prefix for seed derivation; the passphrase is appended.
const SALT_PREFIX: &str = "mnemonic";

/// Length of a derived seed in bytes.
pub const SEED_LEN: usize = 64;

/// The five supported mnemonic sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MnemonicLength {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl MnemonicLength {
    /// All supported lengths, shortest first.
    pub const ALL: [MnemonicLength; 5] = [
        MnemonicLength::Words12,
        MnemonicLength::Words15,
        MnemonicLength::Words18,
        MnemonicLength::Words21,
        MnemonicLength::Words24,
    ];

    /// Map a word count to a length.
    ///
    /// # Returns
    /// `InvalidMnemonicLength` unless `count` is 12, 15, 18, 21 or 24.
    pub fn from_word_count(count: usize) -> Result<Self, PrimitivesError> {
        match count {
            12 => Ok(MnemonicLength::Words12),
            15 => Ok(MnemonicLength::Words15),
            18 => Ok(MnemonicLength::Words18),
            21 => Ok(MnemonicLength::Words21),
            24 => Ok(MnemonicLength::Words24),
            _ => Err(PrimitivesError::InvalidMnemonicLength(count)),
        }
    }

    /// Map an entropy size in bits to a length.
    ///
    /// # Returns
    /// `InvalidEntropyLength` unless `bits` is 128, 160, 192, 224 or 256.
    pub fn from_entropy_bits(bits: usize) -> Result<Self, PrimitivesError> {
        match bits {
            128 => Ok(MnemonicLength::Words12),
            160 => Ok(MnemonicLength::Words15),
            192 => Ok(MnemonicLength::Words18),
            224 => Ok(MnemonicLength::Words21),
            256 => Ok(MnemonicLength::Words24),
            _ => Err(PrimitivesError::InvalidEntropyLength(bits)),
        }
    }

    /// Number of words in the phrase.
    pub fn word_count(self) -> usize {
        match self {
            MnemonicLength::Words12 => 12,
            MnemonicLength::Words15 => 15,
            MnemonicLength::Words18 => 18,
            MnemonicLength::Words21 => 21,
            MnemonicLength::Words24 => 24,
        }
    }

    /// Entropy size in bits (`words * 11 - checksum bits`).
    pub fn entropy_bits(self) -> usize {
        self.word_count() * 32 / 3
    }

    /// Entropy size in bytes.
    pub fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    /// Checksum size in bits (`entropy bits / 32`).
    pub fn checksum_bits(self) -> usize {
        self.entropy_bits() / 32
    }
}

impl fmt::Display for MnemonicLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word_count())
    }
}

/// A 64-byte seed derived from a mnemonic. Zeroized on drop.
#[derive(Clone)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    /// The raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Lowercase hex of the seed.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0[..])
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

/// A validated mnemonic phrase together with the entropy it encodes.
///
/// Both the phrase and the entropy are zeroized on drop.
#[derive(Clone)]
pub struct Mnemonic {
    phrase: Zeroizing<String>,
    entropy: Zeroizing<Vec<u8>>,
    length: MnemonicLength,
}

impl Mnemonic {
    /// Generate a fresh mnemonic from OS randomness.
    pub fn generate(list: &WordList, length: MnemonicLength) -> Self {
        let entropy = generate_entropy(length);
        entropy_to_mnemonic(list, &entropy)
            .expect("generated entropy always has a valid length")
    }

    /// Parse and validate a phrase. Whitespace between words may be any
    /// mix of spaces, tabs and newlines.
    pub fn parse(list: &WordList, text: &str) -> Result<Self, PrimitivesError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let entropy = mnemonic_to_entropy(list, &words)?;
        let length = MnemonicLength::from_word_count(words.len())?;
        Ok(Mnemonic {
            phrase: Zeroizing::new(words.join(" ")),
            entropy,
            length,
        })
    }

    /// The phrase, words separated by single spaces.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// The words of the phrase in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.phrase.split(' ')
    }

    /// The encoded entropy.
    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    /// The phrase size.
    pub fn length(&self) -> MnemonicLength {
        self.length
    }

    /// Derive the 64-byte seed for this phrase and a passphrase.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        seed_from_mnemonic(&self.phrase, passphrase)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("length", &self.length)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for Mnemonic {
    fn eq(&self, other: &Self) -> bool {
        *self.phrase == *other.phrase
    }
}

impl Eq for Mnemonic {}

/// Fill a buffer of the right size for `length` from the OS RNG.
pub fn generate_entropy(length: MnemonicLength) -> Zeroizing<Vec<u8>> {
    let mut entropy = Zeroizing::new(vec![0u8; length.entropy_bytes()]);
    OsRng.fill_bytes(&mut entropy);
    entropy
}

/// Encode entropy as a mnemonic.
///
/// The top `bits / 32` bits of SHA-256(entropy) are appended after the
/// entropy bits, and the whole bit string is read as consecutive 11-bit
/// word indices, most significant first.
///
/// # Returns
/// `InvalidEntropyLength` unless the entropy is 16, 20, 24, 28 or 32 bytes.
pub fn entropy_to_mnemonic(list: &WordList, entropy: &[u8]) -> Result<Mnemonic, PrimitivesError> {
    let length = MnemonicLength::from_entropy_bits(entropy.len() * 8)?;
    let entropy_bits = length.entropy_bits();
    let checksum_byte = sha256(entropy)[0];

    let bit_at = |i: usize| -> u16 {
        if i < entropy_bits {
            ((entropy[i / 8] >> (7 - i % 8)) & 1) as u16
        } else {
            ((checksum_byte >> (7 - (i - entropy_bits))) & 1) as u16
        }
    };

    let mut phrase = Zeroizing::new(String::new());
    for w in 0..length.word_count() {
        let index = (0..BITS_PER_WORD)
            .fold(0u16, |acc, b| (acc << 1) | bit_at(w * BITS_PER_WORD + b));
        let word = list
            .word(index)
            .expect("11-bit index is always inside a 2048-word list");
        if w > 0 {
            phrase.push(' ');
        }
        phrase.push_str(word);
    }

    Ok(Mnemonic {
        phrase,
        entropy: Zeroizing::new(entropy.to_vec()),
        length,
    })
}

/// Decode a mnemonic back into its entropy, verifying the checksum.
///
/// # Returns
/// The entropy, exactly `words * 4 / 3` bytes long, or
/// `InvalidMnemonicLength`, `UnknownWord` or `ChecksumMismatch`.
pub fn mnemonic_to_entropy<S: AsRef<str>>(
    list: &WordList,
    words: &[S],
) -> Result<Zeroizing<Vec<u8>>, PrimitivesError> {
    let length = MnemonicLength::from_word_count(words.len())?;

    // 11 bits per word packed MSB first; 24 words need 33 bytes.
    let total_bits = length.word_count() * BITS_PER_WORD;
    let mut bits = Zeroizing::new(vec![0u8; total_bits.div_ceil(8)]);
    for (w, word) in words.iter().enumerate() {
        let word = word.as_ref();
        let index = list
            .index_of(word)
            .ok_or_else(|| PrimitivesError::UnknownWord(word.to_string()))?;
        for b in 0..BITS_PER_WORD {
            if (index >> (BITS_PER_WORD - 1 - b)) & 1 == 1 {
                let pos = w * BITS_PER_WORD + b;
                bits[pos / 8] |= 1 << (7 - pos % 8);
            }
        }
    }

    let entropy_bytes = length.entropy_bytes();
    let shift = 8 - length.checksum_bits();
    let entropy = Zeroizing::new(bits[..entropy_bytes].to_vec());

    let stored = bits[entropy_bytes] >> shift;
    let expected = sha256(&entropy)[0] >> shift;
    if stored != expected {
        debug!(words = words.len(), "mnemonic checksum mismatch");
        return Err(PrimitivesError::ChecksumMismatch);
    }

    Ok(entropy)
}

/// Derive a 64-byte seed from mnemonic text and a passphrase.
///
/// Runs of whitespace in `mnemonic` collapse to single spaces before
/// hashing. No checksum validation happens here; use
/// [`seed_from_mnemonic_checked`] for untrusted input.
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str) -> Seed {
    let normalized = Zeroizing::new(
        mnemonic.split_whitespace().collect::<Vec<_>>().join(" "),
    );
    let salt = Zeroizing::new(format!("{SALT_PREFIX}{passphrase}"));
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(normalized.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed[..]);
    Seed(seed)
}

/// Validate mnemonic text, then derive its seed.
///
/// # Returns
/// The seed, or whichever validation error `mnemonic_to_entropy` reports.
pub fn seed_from_mnemonic_checked(
    list: &WordList,
    mnemonic: &str,
    passphrase: &str,
) -> Result<Seed, PrimitivesError> {
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    mnemonic_to_entropy(list, &words)?;
    Ok(seed_from_mnemonic(&words.join(" "), passphrase))
}
