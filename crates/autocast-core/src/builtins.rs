//! Standard conversions between common std types.
//!
//! Installed in this order, which also decides ties during path search:
//!
//! | from        | to          | how                                   |
//! |-------------|-------------|---------------------------------------|
//! | `String`    | `i64`       | decimal parse                         |
//! | `Vec<u8>`   | `i64`       | decimal parse of ASCII digits         |
//! | `i64`       | `String`    | decimal format                        |
//! | `String`    | `Vec<u8>`   | Latin-1 encode                        |
//! | `Vec<u8>`   | `String`    | Latin-1 decode                        |
//! | `String`    | `Vec<char>` | split into chars                      |
//! | `Vec<char>` | `String`    | join chars                            |
//! | `Hex`       | `Vec<u8>`   | hex decode                            |
//! | `Vec<u8>`   | `Hex`       | lowercase hex encode                  |

use std::fmt::{self, Write as _};
use std::num::ParseIntError;
use std::str::Utf8Error;

use thiserror::Error;

use crate::error::CastError;
use crate::registry::CastRegistry;
use crate::table::{Castable, ConversionTable};

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("invalid integer: {0}")]
    InvalidInt(#[from] ParseIntError),

    #[error("bytes are not valid UTF-8: {0}")]
    NotUtf8(#[from] Utf8Error),

    #[error("character {0:?} cannot be encoded as Latin-1")]
    NotLatin1(char),

    #[error("invalid hex string {0:?}")]
    InvalidHex(String),
}

/// A string of hexadecimal digits, two per byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hex(String);

impl Hex {
    /// Accepts an even number of ASCII hex digits, either case.
    pub fn parse(digits: &str) -> Result<Self, BuiltinError> {
        if digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BuiltinError::InvalidHex(digits.to_string()));
        }
        Ok(Self(digits.to_ascii_lowercase()))
    }

    pub fn encode(bytes: &[u8]) -> Self {
        let mut digits = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            // Writing into a String cannot fail.
            let _ = write!(digits, "{:02x}", byte);
        }
        Self(digits)
    }

    pub fn decode(&self) -> Result<Vec<u8>, BuiltinError> {
        (0..self.0.len())
            .step_by(2)
            .map(|i| {
                self.0
                    .get(i..i + 2)
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| BuiltinError::InvalidHex(self.0.clone()))
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bytes the digits encode.
    pub fn byte_len(&self) -> usize {
        self.0.len() / 2
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Castable for Hex {
    fn conversions(table: &mut ConversionTable<Self>) {
        table
            .try_to(|hex: Hex| hex.decode())
            .from(|bytes: Vec<u8>| Hex::encode(&bytes));
    }
}

/// Encode `s` as Latin-1, one byte per char. Chars above U+00FF are rejected.
pub fn latin1_encode(s: String) -> Result<Vec<u8>, BuiltinError> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| BuiltinError::NotLatin1(c)))
        .collect()
}

pub fn latin1_decode(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

fn parse_ascii_int(bytes: Vec<u8>) -> Result<i64, BuiltinError> {
    let text = std::str::from_utf8(&bytes)?;
    Ok(text.trim().parse::<i64>()?)
}

/// Register the builtin conversions.
pub fn install(registry: &mut CastRegistry) -> Result<(), CastError> {
    registry.register_fallible(|s: String| s.trim().parse::<i64>())?;
    registry.register_fallible(parse_ascii_int)?;
    registry.register(|i: i64| i.to_string())?;
    registry.register_fallible(latin1_encode)?;
    registry.register(latin1_decode)?;
    registry.register(|s: String| s.chars().collect::<Vec<char>>())?;
    registry.register(|chars: Vec<char>| chars.into_iter().collect::<String>())?;
    registry.register_type::<Hex>()?;
    Ok(())
}

/// A registry pre-populated with [`install`].
pub fn registry() -> Result<CastRegistry, CastError> {
    let mut registry = CastRegistry::new();
    install(&mut registry)?;
    Ok(registry)
}

// ===========================================================================
// Tests
// ===========================================================================
