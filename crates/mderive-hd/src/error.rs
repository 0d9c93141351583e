use mderive_primitives::PrimitivesError;

/// Error types for extended key operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HdError {
    #[error("serialized extended key must be 82 bytes, got {got}")]
    WrongSerializedLength { got: usize },

    #[error("extended key checksum mismatch")]
    ChecksumMismatch,

    #[error("unknown version bytes for key type: {}", hex::encode(.0))]
    UnknownVersion([u8; 4]),

    #[error("private key is zero or not below the curve order")]
    InvalidPrivateKey,

    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("cannot derive a hardened child from a public key")]
    HardenedDerivationOnPublicKey,

    #[error("derived child public key is invalid, use the next index")]
    InvalidChildPublicKey,

    #[error("operation requires a private key")]
    PrivateKeyRequired,

    #[error("maximum derivation depth of 255 exceeded")]
    MaxDepthExceeded,

    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

impl HdError {
    /// Whether deriving at a different index is expected to succeed.
    ///
    /// Only `InvalidChildPublicKey` is index specific; the caller decides
    /// which index to try next.
    pub fn is_retryable_index(&self) -> bool {
        matches!(self, HdError::InvalidChildPublicKey)
    }
}
