/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for FixKit.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across field sets, messages and the tag-value codec.

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all FixKit operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixError {
    /// Error raised by a field set lookup or insertion.
    #[error("field set error: {0}")]
    FieldSet(#[from] FieldSetError),

    /// Error while decoding a field value or a wire frame.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error while encoding a message to the wire.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Message failed structural validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Message type has no registered name.
    #[error(transparent)]
    UnknownType(#[from] UnknownType),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FixError {
    /// Returns true if this error is a [`FieldSetError::DuplicateTags`].
    #[must_use]
    pub const fn is_duplicate_tags(&self) -> bool {
        matches!(self, Self::FieldSet(FieldSetError::DuplicateTags { .. }))
    }

    /// Returns true if this error is a [`FieldSetError::TagNotFound`].
    #[must_use]
    pub const fn is_tag_not_found(&self) -> bool {
        matches!(self, Self::FieldSet(FieldSetError::TagNotFound { .. }))
    }
}

/// Errors raised by field set storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldSetError {
    /// No field with the requested tag exists.
    #[error("tag {tag} not found")]
    TagNotFound {
        /// The tag that was looked up.
        tag: u32,
    },

    /// A field with the same tag is already present and the storage
    /// cannot hold repeated tags.
    #[error("duplicate tag {tag}: existing value '{existing}', new value '{new}'")]
    DuplicateTags {
        /// The repeated tag.
        tag: u32,
        /// Value already stored for the tag.
        existing: String,
        /// Value that was rejected.
        new: String,
    },
}

/// A message type that has no registered display name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown message type: '{0}'")]
pub struct UnknownType(pub String);

/// A message failed structural validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason} in message {message}")]
pub struct ValidationError {
    /// What is wrong with the message.
    pub reason: String,
    /// Display form of the offending message.
    pub message: String,
}

/// Errors that occur while decoding field values or FIX frames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer ends before a complete frame.
    #[error("incomplete message, need more data")]
    Incomplete,

    /// Invalid BeginString field (tag 8).
    #[error("invalid begin string: expected 8=FIX.x.y")]
    InvalidBeginString,

    /// Missing BodyLength field (tag 9).
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// BodyLength is not a number or disagrees with the frame.
    #[error("invalid body length: declared {declared}, actual {actual}")]
    InvalidBodyLength {
        /// Declared body length.
        declared: usize,
        /// Length measured in the frame.
        actual: usize,
    },

    /// Missing MsgType field (tag 35).
    #[error("missing msg type field (tag 35)")]
    MissingMsgType,

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in message.
        declared: u8,
    },

    /// Invalid tag format (not a valid integer).
    #[error("invalid tag format: {0}")]
    InvalidTag(String),

    /// Invalid field value for the expected type.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Repeating group count mismatch.
    #[error("group count mismatch for tag {count_tag}: expected {expected}, found {actual}")]
    GroupCountMismatch {
        /// The tag containing the group count.
        count_tag: u32,
        /// Expected number of group entries.
        expected: usize,
        /// Actual number of group entries found.
        actual: usize,
    },

    /// Invalid UTF-8 in string field.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Errors that occur during FIX message encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Missing required field during encoding.
    #[error("missing required field: tag {tag}")]
    MissingRequiredField {
        /// The tag number of the missing field.
        tag: u32,
    },
}

/// Errors in configuration loading and building.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("missing setting: {0}")]
    Missing(&'static str),

    /// A CompID does not fit the maximum length.
    #[error("invalid comp id '{0}': longer than {max} bytes", max = crate::types::COMP_ID_MAX_LEN)]
    InvalidCompId(String),

    /// The configuration source could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),
}
