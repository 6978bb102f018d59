/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field types for FIX protocol messages.
//!
//! This module provides:
//! - [`FieldTag`]: Type-safe wrapper for FIX field tag numbers
//! - [`Field`]: A single tag/value pair holding the raw encoded value
//! - [`FieldValue`]: Typed values that can be encoded into a field

use crate::error::DecodeError;
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// FIX field tag number.
///
/// Tags are positive integers that identify fields within a FIX message.
/// Standard tags are defined by the FIX protocol (1-5000 range),
/// while user-defined tags use the 5001+ range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldTag(u32);

impl FieldTag {
    /// Creates a new field tag.
    ///
    /// # Arguments
    /// * `tag` - The tag number (must be > 0)
    #[inline]
    #[must_use]
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns true if this is a standard FIX tag (1-5000).
    #[inline]
    #[must_use]
    pub const fn is_standard(self) -> bool {
        self.0 >= 1 && self.0 <= 5000
    }

    /// Returns true if this is a user-defined tag (5001+).
    #[inline]
    #[must_use]
    pub const fn is_user_defined(self) -> bool {
        self.0 > 5000
    }

    /// Returns the FIX field name for this tag, if known.
    #[inline]
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        crate::tags::name(self.0)
    }
}

impl From<u32> for FieldTag {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl From<FieldTag> for u32 {
    fn from(tag: FieldTag) -> Self {
        tag.0
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single FIX field.
///
/// The tag is fixed at construction. The value is kept in its raw encoded
/// form and decoded on demand by the typed accessors. Cloning a field shares
/// the immutable value buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    tag: FieldTag,
    value: Bytes,
}

impl Field {
    /// Creates a field from a typed value.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - Any value convertible into a [`FieldValue`]
    #[must_use]
    pub fn new(tag: u32, value: impl Into<FieldValue>) -> Self {
        Self {
            tag: FieldTag(tag),
            value: value.into().into_bytes(),
        }
    }

    /// Creates a field from already-encoded bytes without copying them.
    #[inline]
    #[must_use]
    pub const fn from_bytes(tag: u32, value: Bytes) -> Self {
        Self {
            tag: FieldTag(tag),
            value,
        }
    }

    /// Returns the field tag.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> FieldTag {
        self.tag
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn tag_number(&self) -> u32 {
        self.tag.0
    }

    /// Returns the raw value buffer.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &Bytes {
        &self.value
    }

    /// Returns a new field with the same tag and a different value.
    #[must_use]
    pub fn with_value(&self, value: impl Into<FieldValue>) -> Self {
        Self::new(self.tag.0, value)
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn as_str(&self) -> Result<&str, DecodeError> {
        std::str::from_utf8(&self.value).map_err(DecodeError::from)
    }

    /// Parses the value as the specified type.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if parsing fails.
    pub fn parse<T: FromStr>(&self) -> Result<T, DecodeError> {
        let s = self.as_str()?;
        s.parse().map_err(|_| DecodeError::InvalidFieldValue {
            tag: self.tag.0,
            reason: format!("failed to parse '{}' as {}", s, std::any::type_name::<T>()),
        })
    }

    /// Returns the value as a u64.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a valid integer.
    pub fn as_u64(&self) -> Result<u64, DecodeError> {
        self.parse()
    }

    /// Returns the value as an i64.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a valid integer.
    pub fn as_i64(&self) -> Result<i64, DecodeError> {
        self.parse()
    }

    /// Returns the value as a Decimal.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a valid decimal.
    pub fn as_decimal(&self) -> Result<Decimal, DecodeError> {
        self.parse()
    }

    /// Returns the value as a bool (FIX uses 'Y'/'N').
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not 'Y' or 'N'.
    pub fn as_bool(&self) -> Result<bool, DecodeError> {
        match self.value.as_ref() {
            b"Y" => Ok(true),
            b"N" => Ok(false),
            _ => Err(DecodeError::InvalidFieldValue {
                tag: self.tag.0,
                reason: "expected 'Y' or 'N'".to_string(),
            }),
        }
    }

    /// Returns the value as a single character.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a single ASCII character.
    pub fn as_char(&self) -> Result<char, DecodeError> {
        match self.value.as_ref() {
            [b] if b.is_ascii() => Ok(*b as char),
            _ => Err(DecodeError::InvalidFieldValue {
                tag: self.tag.0,
                reason: "expected single ASCII character".to_string(),
            }),
        }
    }

    /// Returns the value as a UTC timestamp.
    ///
    /// Accepts `YYYYMMDD-HH:MM:SS` with an optional fractional part.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidFieldValue` if the value is not a FIX UTCTimestamp.
    pub fn as_utc_timestamp(&self) -> Result<DateTime<Utc>, DecodeError> {
        let s = self.as_str()?;
        let format = if s.contains('.') {
            "%Y%m%d-%H:%M:%S%.f"
        } else {
            "%Y%m%d-%H:%M:%S"
        };
        NaiveDateTime::parse_from_str(s, format)
            .map(|dt| dt.and_utc())
            .map_err(|e| DecodeError::InvalidFieldValue {
                tag: self.tag.0,
                reason: format!("invalid UTCTimestamp '{}': {}", s, e),
            })
    }

    /// Returns the raw bytes of the value.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Returns the length of the value in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, String::from_utf8_lossy(&self.value))
    }
}

impl<V: Into<FieldValue>> From<(u32, V)> for Field {
    fn from((tag, value): (u32, V)) -> Self {
        Self::new(tag, value)
    }
}

/// Typed FIX field value.
///
/// Converted into the FIX wire encoding when a [`Field`] is built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// String value.
    String(String),
    /// Integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Decimal/float value.
    Decimal(Decimal),
    /// Boolean value (Y/N).
    Bool(bool),
    /// Single character value.
    Char(char),
    /// Raw bytes (for data fields).
    Data(Bytes),
}

impl FieldValue {
    /// Encodes the value into its FIX wire representation.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::String(s) => Bytes::from(s),
            Self::Int(v) => Bytes::copy_from_slice(itoa::Buffer::new().format(v).as_bytes()),
            Self::UInt(v) => Bytes::copy_from_slice(itoa::Buffer::new().format(v).as_bytes()),
            Self::Decimal(v) => Bytes::from(v.normalize().to_string()),
            Self::Bool(v) => Bytes::from_static(if v { b"Y" } else { b"N" }),
            Self::Char(c) => {
                let mut buf = [0u8; 4];
                Bytes::copy_from_slice(c.encode_utf8(&mut buf).as_bytes())
            }
            Self::Data(d) => d,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", if *v { "Y" } else { "N" }),
            Self::Char(c) => write!(f, "{}", c),
            Self::Data(d) => write!(f, "<{} bytes>", d.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for FieldValue {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<Bytes> for FieldValue {
    fn from(value: Bytes) -> Self {
        Self::Data(value)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(value: &[u8]) -> Self {
        Self::Data(Bytes::copy_from_slice(value))
    }
}

impl From<crate::types::SeqNum> for FieldValue {
    fn from(value: crate::types::SeqNum) -> Self {
        Self::UInt(value.value())
    }
}

impl From<&crate::types::CompId> for FieldValue {
    fn from(value: &crate::types::CompId) -> Self {
        Self::String(value.as_str().to_string())
    }
}
