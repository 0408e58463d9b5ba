use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ssz::{Decode, DecodeError, Encode};
use tree_hash::{merkle_root, Hash256, PackedEncoding, TreeHash, TreeHashType};

use crate::utils::bytes::{hex_decode_fixed, hex_encode};

/// BLS signature over the sync committee signing root.
pub type BlsSignature = ByteVector<96>;

/// Compressed BLS public key.
pub type BlsPublicKey = ByteVector<48>;

/// Opaque fixed-size byte vector, serialized as 0x-prefixed hex.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ByteVector<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for ByteVector<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> AsRef<[u8]> for ByteVector<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for ByteVector<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> Decode for ByteVector<N> {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        N
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        <[u8; N]>::try_from(bytes)
            .map(Self)
            .map_err(|_| DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: N,
            })
    }
}

impl<const N: usize> Encode for ByteVector<N> {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0);
    }

    fn ssz_bytes_len(&self) -> usize {
        N
    }

    fn ssz_fixed_len() -> usize {
        N
    }
}

impl<'de, const N: usize> Deserialize<'de> for ByteVector<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let result: String = Deserialize::deserialize(deserializer)?;
        hex_decode_fixed::<N>(&result)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

impl<const N: usize> Serialize for ByteVector<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex_encode(self.0))
    }
}

impl<const N: usize> TreeHash for ByteVector<N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        PackedEncoding::from_vec(self.0.to_vec())
    }

    fn tree_hash_packing_factor() -> usize {
        1
    }

    fn tree_hash_root(&self) -> Hash256 {
        merkle_root(&self.0, 0)
    }
}
