use std::fmt::{self, Write};
use std::str::FromStr;

use thiserror::Error;

/// Number of bytes in a raw object ID.
pub const ID_LEN: usize = 20;

/// Number of hex digits in the printed form of an object ID.
pub const HEX_LEN: usize = ID_LEN * 2;

/// Reasons a byte string or hex string is not an object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    #[error("empty object ID")]
    Empty,

    /// Only lowercase hex digits are accepted, so `'A'` is rejected too.
    #[error("invalid hex digit `{0}` in object ID")]
    InvalidDigit(char),

    /// The value had the given length, which is more than expected.
    #[error("object ID is too long ({0} digits or bytes)")]
    TooLong(usize),

    /// The value had the given length, which is less than expected.
    #[error("object ID is too short ({0} digits or bytes)")]
    TooShort(usize),
}

/// The SHA-1 digest of an object's envelope.
///
/// Stored as 20 raw bytes. Printed (and parsed) as 40 lowercase hex digits.
/// The all-zero ID is valid.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    bytes: [u8; ID_LEN],
}

impl Id {
    /// Create an ID from its raw 20-byte form, as found in tree entries.
    pub fn new(raw: &[u8]) -> Result<Id, ParseIdError> {
        check_len(raw.len(), ID_LEN)?;

        let mut bytes = [0u8; ID_LEN];
        bytes.copy_from_slice(raw);
        Ok(Id { bytes })
    }

    /// Parse the 40-digit lowercase hex form.
    pub fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Id, ParseIdError> {
        let hex = hex.as_ref();
        check_len(hex.len(), HEX_LEN)?;

        let mut bytes = [0u8; ID_LEN];
        for (byte, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
            *byte = (nybble(pair[0])? << 4) | nybble(pair[1])?;
        }
        Ok(Id { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Split the hex form into the loose-object directory (first two digits)
    /// and file name (remaining 38 digits).
    pub fn loose_parts(&self) -> (String, String) {
        let mut hex = self.to_string();
        let file = hex.split_off(2);
        (hex, file)
    }
}

impl From<[u8; ID_LEN]> for Id {
    fn from(bytes: [u8; ID_LEN]) -> Id {
        Id { bytes }
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s)
    }
}

static HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            f.write_char(HEX_DIGITS[usize::from(byte >> 4)] as char)?;
            f.write_char(HEX_DIGITS[usize::from(byte & 0xf)] as char)?;
        }
        Ok(())
    }
}

fn check_len(len: usize, expected: usize) -> Result<(), ParseIdError> {
    match len {
        0 => Err(ParseIdError::Empty),
        n if n < expected => Err(ParseIdError::TooShort(n)),
        n if n > expected => Err(ParseIdError::TooLong(n)),
        _ => Ok(()),
    }
}

fn nybble(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
