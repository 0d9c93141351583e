//! Word lists for mnemonic encoding.
//!
//! A `WordList` is an immutable two-way lookup between 11-bit indices and
//! words. It is built once by the caller and passed explicitly to every
//! codec call, so several lists can coexist in one process.

use std::collections::HashMap;
use std::fmt;

use crate::PrimitivesError;

/// Number of entries in a mnemonic word list (2^11).
pub const WORD_LIST_LEN: usize = 2048;

/// An ordered list of 2048 unique words.
#[derive(Clone)]
pub struct WordList {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl WordList {
    /// Build a word list from exactly 2048 unique words.
    ///
    /// # Returns
    /// `InvalidWordList` if the count is wrong, a word is empty or contains
    /// whitespace, or a word appears twice.
    pub fn new<I, S>(words: I) -> Result<Self, PrimitivesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORD_LIST_LEN {
            return Err(PrimitivesError::InvalidWordList(format!(
                "expected {} words, got {}",
                WORD_LIST_LEN,
                words.len()
            )));
        }

        let mut index = HashMap::with_capacity(WORD_LIST_LEN);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(PrimitivesError::InvalidWordList(format!(
                    "entry {i} is not a single word"
                )));
            }
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(PrimitivesError::InvalidWordList(format!(
                    "duplicate word: {word}"
                )));
            }
        }

        Ok(WordList { words, index })
    }

    /// The standard English list.
    pub fn english() -> Self {
        let words = ::bip39::Language::English.word_list();
        WordList::new(words.iter().copied())
            .expect("the English list has 2048 unique words")
    }

    /// The word at an 11-bit index.
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// The 11-bit index of a word, if the word is in the list.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Number of words (always 2048).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; a valid list is never empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("first", &self.words.first())
            .field("len", &self.words.len())
            .finish()
    }
}
