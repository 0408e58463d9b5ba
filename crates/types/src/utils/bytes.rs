use thiserror::Error;

/// A error related to hexadecimal string encoding and decoding.
#[derive(Error, Debug, PartialEq)]
pub enum HexError {
    /// A failure to convert a string into a byte vector.
    #[error("could not decode hex: {0}")]
    DecodeError(#[from] hex::FromHexError),
    /// A failure to adhere to the convention that a hex-encoded
    /// string must include the "0x" prefix.
    #[error("hex strings must start with 0x, but found {0:?}")]
    PrefixError(String),
    /// The decoded bytes do not have the expected length.
    #[error("invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

/// Encode hex with 0x prefix
pub fn hex_encode<T: AsRef<[u8]>>(data: T) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode hex with 0x prefix
pub fn hex_decode(data: &str) -> Result<Vec<u8>, HexError> {
    match data.strip_prefix("0x") {
        Some(stripped) => Ok(hex::decode(stripped)?),
        None => Err(HexError::PrefixError(data.chars().take(2).collect())),
    }
}

/// Decode 0x-prefixed hex into exactly `N` bytes.
pub fn hex_decode_fixed<const N: usize>(data: &str) -> Result<[u8; N], HexError> {
    let bytes = hex_decode(data)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| HexError::InvalidLength {
        expected: N,
        found: bytes.len(),
    })
}
