//! Raw Base58 encoding and decoding.
//!
//! This module only maps bytes to the Bitcoin Base58 alphabet and back.
//! Integrity checks are the caller's business: extended keys append their
//! own checksum before encoding and verify it after decoding.

use crate::PrimitivesError;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or `InvalidBase58` for characters outside the
/// alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_empty() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_base58_leading_zeros() {
        let input = hex::decode("000000287FB4CD").unwrap();
        assert_eq!(encode(&input), "111233QC4");
        assert_eq!(decode("111233QC4").unwrap(), input);
    }

    #[test]
    fn test_base58_known_value() {
        let input = hex::decode("0123456789ABCDEF").unwrap();
        assert_eq!(encode(&input), "C3CPq7c8PY");
        assert_eq!(decode("C3CPq7c8PY").unwrap(), input);
    }

    #[test]
    fn test_base58_rejects_excluded_characters() {
        // 0, O, I and l are not part of the alphabet.
        for bad in ["0abc", "Oabc", "Iabc", "labc", "1234!@#$"] {
            assert!(
                matches!(decode(bad), Err(PrimitivesError::InvalidBase58(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_base58_extended_key_prefix() {
        // 82 bytes starting with the private version tag always render as "xprv".
        let mut payload = vec![0u8; 82];
        payload[..4].copy_from_slice(&[0x04, 0x88, 0xad, 0xe4]);
        let encoded = encode(&payload);
        assert!(encoded.starts_with("xprv"), "got {encoded}");
        assert_eq!(decode(&encoded).unwrap(), payload);
    }
}
