//! Extended key wire format.
//!
//! 78-byte payload followed by a 4-byte double SHA-256 checksum:
//!
//! ```text
//! version(4) | depth(1) | parent fingerprint(4) | child number(4, BE)
//!   | chain code(32) | key(33) | checksum(4)
//! ```
//!
//! Private keys occupy the key field as `0x00 || k`. The 82 bytes are
//! Base58-encoded for the `xprv...` / `xpub...` text form.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use mderive_primitives::base58;
use mderive_primitives::ec::{is_valid_private_key, CurvePoint, COMPRESSED_LEN, SCALAR_LEN};
use mderive_primitives::hash::{checksum, CHECKSUM_LEN, FINGERPRINT_LEN};

use crate::error::HdError;
use crate::key::{ExtendedKey, KeyMaterial, CHAIN_CODE_LEN};
use crate::path::ChildNumber;

// === Wire constants ===

/// Version tag of a serialized private key (`xprv`).
pub const VERSION_PRIVATE: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
/// Version tag of a serialized public key (`xpub`).
pub const VERSION_PUBLIC: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// Length of the payload covered by the checksum.
pub const PAYLOAD_LEN: usize = 78;
/// Length of a serialized extended key.
pub const SERIALIZED_LEN: usize = PAYLOAD_LEN + CHECKSUM_LEN;

const DEPTH_OFFSET: usize = 4;
const FINGERPRINT_OFFSET: usize = 5;
const CHILD_OFFSET: usize = 9;
const CHAIN_CODE_OFFSET: usize = 13;
const KEY_OFFSET: usize = 45;

/// Serialize a node into its 82-byte wire form.
pub fn serialize(key: &ExtendedKey) -> Zeroizing<[u8; SERIALIZED_LEN]> {
    let mut out = Zeroizing::new([0u8; SERIALIZED_LEN]);
    let version = match key.key_material() {
        KeyMaterial::Private(_) => VERSION_PRIVATE,
        KeyMaterial::Public(_) => VERSION_PUBLIC,
    };
    out[..DEPTH_OFFSET].copy_from_slice(&version);
    out[DEPTH_OFFSET] = key.depth();
    out[FINGERPRINT_OFFSET..CHILD_OFFSET].copy_from_slice(&key.parent_fingerprint());
    out[CHILD_OFFSET..CHAIN_CODE_OFFSET].copy_from_slice(&key.child_number().to_be_bytes());
    out[CHAIN_CODE_OFFSET..KEY_OFFSET].copy_from_slice(key.chain_code());
    match key.key_material() {
        KeyMaterial::Private(k) => {
            out[KEY_OFFSET] = 0x00;
            out[KEY_OFFSET + 1..PAYLOAD_LEN].copy_from_slice(&k[..]);
        }
        KeyMaterial::Public(p) => out[KEY_OFFSET..PAYLOAD_LEN].copy_from_slice(p),
    }
    let sum = checksum(&out[..PAYLOAD_LEN]);
    out[PAYLOAD_LEN..].copy_from_slice(&sum);
    out
}

/// Parse the 82-byte wire form.
///
/// The checksum is checked before any field is read. A private key must
/// satisfy `0 < k < N` (`InvalidPrivateKey`); a public key must be a
/// valid compressed point.
pub fn deserialize(data: &[u8]) -> Result<ExtendedKey, HdError> {
    if data.len() != SERIALIZED_LEN {
        return Err(HdError::WrongSerializedLength { got: data.len() });
    }
    let (payload, sum) = data.split_at(PAYLOAD_LEN);
    if checksum(payload)[..] != *sum {
        return Err(HdError::ChecksumMismatch);
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&payload[..DEPTH_OFFSET]);
    let is_private = payload[KEY_OFFSET] == 0x00;
    let expected = if is_private { VERSION_PRIVATE } else { VERSION_PUBLIC };
    if version != expected {
        return Err(HdError::UnknownVersion(version));
    }

    let mut parent_fingerprint = [0u8; FINGERPRINT_LEN];
    parent_fingerprint.copy_from_slice(&payload[FINGERPRINT_OFFSET..CHILD_OFFSET]);
    let mut child = [0u8; 4];
    child.copy_from_slice(&payload[CHILD_OFFSET..CHAIN_CODE_OFFSET]);
    let mut chain_code = [0u8; CHAIN_CODE_LEN];
    chain_code.copy_from_slice(&payload[CHAIN_CODE_OFFSET..KEY_OFFSET]);

    let key = if is_private {
        let mut k = Zeroizing::new([0u8; SCALAR_LEN]);
        k.copy_from_slice(&payload[KEY_OFFSET + 1..]);
        if !is_valid_private_key(&k) {
            return Err(HdError::InvalidPrivateKey);
        }
        KeyMaterial::Private(k)
    } else {
        let mut p = [0u8; COMPRESSED_LEN];
        p.copy_from_slice(&payload[KEY_OFFSET..]);
        CurvePoint::decompress(&p)?;
        KeyMaterial::Public(p)
    };

    Ok(ExtendedKey::from_parts(
        key,
        chain_code,
        payload[DEPTH_OFFSET],
        ChildNumber::from(u32::from_be_bytes(child)),
        parent_fingerprint,
    ))
}

impl ExtendedKey {
    /// Base58 text form (`xprv...` or `xpub...`).
    pub fn to_base58(&self) -> Zeroizing<String> {
        Zeroizing::new(base58::encode(&serialize(self)[..]))
    }

    /// Parse the Base58 text form.
    pub fn from_base58(s: &str) -> Result<ExtendedKey, HdError> {
        let data = Zeroizing::new(base58::decode(s)?);
        deserialize(&data)
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for ExtendedKey {
    type Err = HdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtendedKey::from_base58(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mderive_primitives::PrimitivesError;

    const TV1_SEED: &str = "000102030405060708090a0b0c0d0e0f";
    const TV1_XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";
    const TV1_XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
    const TV1_H0_XPRV: &str = "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7";
    const TV1_H0_XPUB: &str = "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw";

    fn tv1_master() -> ExtendedKey {
        ExtendedKey::new_master(&hex::decode(TV1_SEED).unwrap())
    }

    /// Recompute the trailing checksum after editing the payload.
    fn reseal(data: &mut [u8; SERIALIZED_LEN]) {
        let sum = checksum(&data[..PAYLOAD_LEN]);
        data[PAYLOAD_LEN..].copy_from_slice(&sum);
    }

    #[test]
    fn test_master_text_forms() {
        let master = tv1_master();
        assert_eq!(master.to_base58().as_str(), TV1_XPRV);
        assert_eq!(master.public_key().unwrap().to_string(), TV1_XPUB);
    }

    #[test]
    fn test_first_hardened_child_text_forms() {
        let child = tv1_master().derive_child(ChildNumber::hardened(0).unwrap()).unwrap();
        assert_eq!(child.to_string(), TV1_H0_XPRV);
        assert_eq!(child.public_key().unwrap().to_string(), TV1_H0_XPUB);
    }

    #[test]
    fn test_parse_known_keys() {
        let xprv: ExtendedKey = TV1_XPRV.parse().unwrap();
        assert_eq!(xprv, tv1_master());
        let xpub: ExtendedKey = TV1_XPUB.parse().unwrap();
        assert!(!xpub.is_private());
        assert_eq!(xpub, tv1_master().public_key().unwrap());
    }

    #[test]
    fn test_layout() {
        let data = serialize(&tv1_master());
        assert_eq!(data[..4], VERSION_PRIVATE);
        assert_eq!(data[DEPTH_OFFSET], 0);
        assert_eq!(data[KEY_OFFSET], 0x00);
        let data = serialize(&tv1_master().public_key().unwrap());
        assert_eq!(data[..4], VERSION_PUBLIC);
        assert!(data[KEY_OFFSET] == 0x02 || data[KEY_OFFSET] == 0x03);
    }

    #[test]
    fn test_roundtrip_all_depths() {
        let master = tv1_master();
        for depth in 0..=u8::MAX {
            let node = ExtendedKey::from_parts(
                master.key_material().clone(),
                *master.chain_code(),
                depth,
                ChildNumber::from(0x8000_0000 | depth as u32),
                [depth, 1, 2, 3],
            );
            assert_eq!(deserialize(&serialize(&node)[..]).unwrap(), node);
            let public = node.public_key().unwrap();
            assert_eq!(deserialize(&serialize(&public)[..]).unwrap(), public);
        }
    }

    #[test]
    fn test_wrong_length() {
        let data = serialize(&tv1_master());
        assert_eq!(
            deserialize(&data[..81]).unwrap_err(),
            HdError::WrongSerializedLength { got: 81 }
        );
        let mut long = data.to_vec();
        long.push(0);
        assert_eq!(
            deserialize(&long).unwrap_err(),
            HdError::WrongSerializedLength { got: 83 }
        );
    }

    #[test]
    fn test_any_payload_bit_flip_fails_checksum() {
        let data = serialize(&tv1_master());
        for byte in 0..PAYLOAD_LEN {
            for bit in 0..8 {
                let mut flipped = *data;
                flipped[byte] ^= 1 << bit;
                assert_eq!(
                    deserialize(&flipped).unwrap_err(),
                    HdError::ChecksumMismatch,
                    "byte {byte} bit {bit}"
                );
            }
        }
    }

    #[test]
    fn test_version_must_match_key_field() {
        let mut data = *serialize(&tv1_master());
        data[..4].copy_from_slice(&VERSION_PUBLIC);
        reseal(&mut data);
        assert_eq!(
            deserialize(&data).unwrap_err(),
            HdError::UnknownVersion(VERSION_PUBLIC)
        );

        // Testnet tprv is not accepted.
        let tprv = [0x04, 0x35, 0x83, 0x94];
        data[..4].copy_from_slice(&tprv);
        reseal(&mut data);
        assert_eq!(deserialize(&data).unwrap_err(), HdError::UnknownVersion(tprv));
    }

    #[test]
    fn test_public_key_field_must_be_on_curve() {
        let mut data = *serialize(&tv1_master().public_key().unwrap());
        data[KEY_OFFSET] = 0x04;
        reseal(&mut data);
        assert_eq!(
            deserialize(&data).unwrap_err(),
            HdError::Primitives(PrimitivesError::InvalidPointEncoding)
        );
    }

    #[test]
    fn test_private_key_field_must_be_in_range() {
        let order =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap();
        for key in [vec![0u8; SCALAR_LEN], order, vec![0xff; SCALAR_LEN]] {
            let mut data = *serialize(&tv1_master());
            data[KEY_OFFSET + 1..PAYLOAD_LEN].copy_from_slice(&key);
            reseal(&mut data);
            assert_eq!(
                deserialize(&data).unwrap_err(),
                HdError::InvalidPrivateKey,
                "key {}",
                hex::encode(&key)
            );
        }

        // N - 1 is the largest accepted key.
        let mut data = *serialize(&tv1_master());
        data[KEY_OFFSET + 1..PAYLOAD_LEN].copy_from_slice(
            &hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140").unwrap(),
        );
        reseal(&mut data);
        assert!(deserialize(&data).unwrap().is_private());
    }

    #[test]
    fn test_bad_base58() {
        assert!(matches!(
            ExtendedKey::from_base58("xprv0OIl"),
            Err(HdError::Primitives(PrimitivesError::InvalidBase58(_)))
        ));
        assert!(matches!(
            ExtendedKey::from_base58("1111"),
            Err(HdError::WrongSerializedLength { got: 4 })
        ));
    }
}
