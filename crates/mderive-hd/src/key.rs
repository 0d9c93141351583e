//! BIP-32 extended keys and child key derivation.
//!
//! An `ExtendedKey` is one node of the derivation tree: a private scalar or
//! compressed public point, plus the chain code and position metadata. Nodes
//! are immutable; every derivation returns a new node.

use std::fmt;

use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use mderive_primitives::ec::{add_scalars, CurvePoint, COMPRESSED_LEN, SCALAR_LEN};
use mderive_primitives::hash::{fingerprint, sha512_hmac, FINGERPRINT_LEN};

use crate::error::HdError;
use crate::path::ChildNumber;

/// HMAC key used to turn a seed into a master key.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Length of a chain code in bytes.
pub const CHAIN_CODE_LEN: usize = 32;

/// Key material held by a node.
#[derive(Clone, PartialEq, Eq)]
pub(crate) enum KeyMaterial {
    /// A 32-byte big-endian scalar.
    Private(Zeroizing<[u8; SCALAR_LEN]>),
    /// A 33-byte compressed point.
    Public([u8; COMPRESSED_LEN]),
}

/// A node in a BIP-32 key tree.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    key: KeyMaterial,
    chain_code: [u8; CHAIN_CODE_LEN],
    depth: u8,
    child_number: ChildNumber,
    parent_fingerprint: [u8; FINGERPRINT_LEN],
}

impl ExtendedKey {
    /// Create the master (root) key for a seed.
    ///
    /// HMAC-SHA512 keyed with "Bitcoin seed" over the seed; the left half is
    /// the private key, the right half the chain code.
    pub fn new_master(seed: &[u8]) -> Self {
        let i = Zeroizing::new(sha512_hmac(MASTER_HMAC_KEY, seed));
        let (key, chain_code) = split_hmac(&i);
        debug!(seed_len = seed.len(), "created master key");
        ExtendedKey {
            key: KeyMaterial::Private(key),
            chain_code,
            depth: 0,
            child_number: ChildNumber::from(0),
            parent_fingerprint: [0u8; FINGERPRINT_LEN],
        }
    }

    /// Assemble a node from decoded fields.
    pub(crate) fn from_parts(
        key: KeyMaterial,
        chain_code: [u8; CHAIN_CODE_LEN],
        depth: u8,
        child_number: ChildNumber,
        parent_fingerprint: [u8; FINGERPRINT_LEN],
    ) -> Self {
        ExtendedKey {
            key,
            chain_code,
            depth,
            child_number,
            parent_fingerprint,
        }
    }

    pub(crate) fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    /// Whether this node holds a private key.
    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    /// The 32-byte private key, if this is a private node.
    pub fn private_key_bytes(&self) -> Option<&[u8; SCALAR_LEN]> {
        match &self.key {
            KeyMaterial::Private(k) => Some(&**k),
            KeyMaterial::Public(_) => None,
        }
    }

    /// The 33-byte compressed public key, computed for private nodes.
    ///
    /// # Returns
    /// `InvalidPointEncoding` only if the private scalar is congruent to
    /// zero, which no derivation from a real seed produces.
    pub fn public_key_bytes(&self) -> Result<[u8; COMPRESSED_LEN], HdError> {
        match &self.key {
            KeyMaterial::Private(k) => Ok(CurvePoint::mul_base(k).compress()?),
            KeyMaterial::Public(p) => Ok(*p),
        }
    }

    /// The chain code.
    pub fn chain_code(&self) -> &[u8; CHAIN_CODE_LEN] {
        &self.chain_code
    }

    /// Number of derivation steps from the root.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Index of this node below its parent.
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// Fingerprint of the parent key; zero at the root.
    pub fn parent_fingerprint(&self) -> [u8; FINGERPRINT_LEN] {
        self.parent_fingerprint
    }

    /// This node's own fingerprint: Hash160 of its public key, truncated.
    pub fn fingerprint(&self) -> Result<[u8; FINGERPRINT_LEN], HdError> {
        Ok(fingerprint(&self.public_key_bytes()?))
    }

    /// Project this node to its public counterpart.
    ///
    /// Chain code, depth, child number and parent fingerprint are kept. A
    /// public node is returned as a copy.
    pub fn public_key(&self) -> Result<ExtendedKey, HdError> {
        Ok(ExtendedKey {
            key: KeyMaterial::Public(self.public_key_bytes()?),
            chain_code: self.chain_code,
            depth: self.depth,
            child_number: self.child_number,
            parent_fingerprint: self.parent_fingerprint,
        })
    }

    /// Derive the child at `index`.
    ///
    /// Hardened indices (top bit set) hash the private key and are only
    /// available on private nodes; normal indices hash the compressed
    /// public key. A private parent yields a private child and a public
    /// parent a public child.
    ///
    /// # Returns
    /// The child, or:
    /// * `HardenedDerivationOnPublicKey` for a hardened index on a public node.
    /// * `InvalidChildPublicKey` if public derivation lands on the identity.
    ///   Only this index is affected.
    /// * `MaxDepthExceeded` below depth 255.
    pub fn derive_child(&self, index: impl Into<ChildNumber>) -> Result<ExtendedKey, HdError> {
        let child_number = index.into();
        if !self.is_private() && child_number.is_hardened() {
            return Err(HdError::HardenedDerivationOnPublicKey);
        }
        let depth = self.depth.checked_add(1).ok_or(HdError::MaxDepthExceeded)?;

        let parent_public = self.public_key_bytes()?;
        let mut data = Zeroizing::new(Vec::with_capacity(1 + COMPRESSED_LEN + 4));
        match (&self.key, child_number.is_hardened()) {
            (KeyMaterial::Private(k), true) => {
                data.push(0x00);
                data.extend_from_slice(&k[..]);
            }
            _ => data.extend_from_slice(&parent_public),
        }
        data.extend_from_slice(&child_number.to_be_bytes());

        let i = Zeroizing::new(sha512_hmac(&self.chain_code, &data));
        let (il, chain_code) = split_hmac(&i);

        let key = match &self.key {
            KeyMaterial::Private(k) => KeyMaterial::Private(Zeroizing::new(add_scalars(&il, k))),
            KeyMaterial::Public(p) => {
                let parent_point = CurvePoint::decompress(p)?;
                let child_point = CurvePoint::mul_base(&il).add_point(&parent_point);
                let compressed = child_point.compress().map_err(|_| {
                    warn!(%child_number, depth, "public child derivation hit the identity");
                    HdError::InvalidChildPublicKey
                })?;
                KeyMaterial::Public(compressed)
            }
        };

        let parent_fingerprint = fingerprint(&parent_public);
        trace!(
            %child_number,
            depth,
            parent = %hex::encode(parent_fingerprint),
            "derived child key"
        );

        Ok(ExtendedKey {
            key,
            chain_code,
            depth,
            child_number,
            parent_fingerprint,
        })
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private", &self.is_private())
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .finish_non_exhaustive()
    }
}

/// Split a 64-byte HMAC output into `IL` (key material) and `IR` (chain code).
fn split_hmac(i: &[u8; 64]) -> (Zeroizing<[u8; SCALAR_LEN]>, [u8; CHAIN_CODE_LEN]) {
    let mut il = Zeroizing::new([0u8; SCALAR_LEN]);
    il.copy_from_slice(&i[..SCALAR_LEN]);
    let mut ir = [0u8; CHAIN_CODE_LEN];
    ir.copy_from_slice(&i[SCALAR_LEN..]);
    (il, ir)
}
