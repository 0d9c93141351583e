//! Derivation paths of the form `m/44'/0'/0'/0/5`.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::HdError;
use crate::key::ExtendedKey;

/// A child index. Values with the top bit set are hardened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildNumber(u32);

impl ChildNumber {
    /// Offset added to an index to mark it hardened (2^31).
    pub const HARDENED_BIT: u32 = 0x8000_0000;

    /// A normal (non-hardened) child index.
    pub fn normal(index: u32) -> Result<Self, HdError> {
        if index >= Self::HARDENED_BIT {
            return Err(HdError::InvalidDerivationPath(format!(
                "index {index} out of range"
            )));
        }
        Ok(ChildNumber(index))
    }

    /// A hardened child index; `index` is the offset below the hardened bit.
    pub fn hardened(index: u32) -> Result<Self, HdError> {
        Self::normal(index).map(|c| ChildNumber(c.0 | Self::HARDENED_BIT))
    }

    pub fn is_hardened(&self) -> bool {
        self.0 & Self::HARDENED_BIT != 0
    }

    /// The index without the hardened bit.
    pub fn index(&self) -> u32 {
        self.0 & !Self::HARDENED_BIT
    }

    /// The raw 32-bit value, hardened bit included.
    pub fn to_u32(&self) -> u32 {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<u32> for ChildNumber {
    fn from(raw: u32) -> Self {
        ChildNumber(raw)
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.index())
        } else {
            write!(f, "{}", self.index())
        }
    }
}

impl FromStr for ChildNumber {
    type Err = HdError;

    /// Parse one segment: decimal digits, optionally followed by `'` or `h`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix('\'').or_else(|| s.strip_suffix('h')) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HdError::InvalidDerivationPath(format!(
                "bad segment {s:?}"
            )));
        }
        let index: u32 = digits.parse().map_err(|_| {
            HdError::InvalidDerivationPath(format!("index {digits} out of range"))
        })?;
        if hardened {
            ChildNumber::hardened(index)
        } else {
            ChildNumber::normal(index)
        }
    }
}

/// An ordered list of child indices, starting at the root `m`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path, `m`.
    pub fn master() -> Self {
        DerivationPath(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChildNumber> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }

    /// A new path with `child` appended.
    pub fn child(&self, child: ChildNumber) -> DerivationPath {
        let mut segments = self.0.clone();
        segments.push(child);
        DerivationPath(segments)
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(segments: Vec<ChildNumber>) -> Self {
        DerivationPath(segments)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{child}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = HdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(HdError::InvalidDerivationPath(format!(
                "{s:?} must start with \"m\""
            )));
        }
        parts
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}

impl ExtendedKey {
    /// Derive the descendant at `path`, applying `derive_child` per segment.
    ///
    /// The empty path returns a copy of `self`. Errors from any step are
    /// returned unchanged.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedKey, HdError> {
        let node = path
            .iter()
            .try_fold(self.clone(), |node, child| node.derive_child(*child))?;
        debug!(%path, depth = node.depth(), "derived path");
        Ok(node)
    }
}

/// Parse `path` and derive it from `key`.
pub fn derive_from_path_str(key: &ExtendedKey, path: &str) -> Result<ExtendedKey, HdError> {
    key.derive_path(&path.parse()?)
}
