/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message with an opaque body.
//!
//! [`RawMessage`] structures only the header and trailer tags (BeginString,
//! BodyLength, MsgType, MsgSeqNum, CheckSum) and keeps the rest of the
//! message as encoded bytes. Relays and stores that never look inside the
//! body avoid parsing it.

use crate::fieldset::{FieldSet, OrderedDictFieldSet};
use crate::message::{FixMessage, write_summary};
use bytes::Bytes;
use fixkit_core::checksum::{calculate_checksum, format_checksum, parse_checksum};
use fixkit_core::config::Settings;
use fixkit_core::error::{ConfigError, DecodeError, FieldSetError, FixError};
use fixkit_core::field::Field;
use fixkit_core::tags::{BEGIN_STRING, BODY_LENGTH, CHECK_SUM, MSG_SEQ_NUM, MSG_TYPE};
use fixkit_core::types::SeqNum;
use std::fmt;

/// A FIX message whose body is kept encoded.
///
/// BodyLength and CheckSum describe `encoded_body`: the byte length and the
/// byte sum modulo 256. `clone()` copies the stored values as they are and
/// recomputes neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    fields: OrderedDictFieldSet,
    encoded_body: Bytes,
}

impl RawMessage {
    /// Starts building a raw message.
    #[must_use]
    pub fn builder(msg_type: impl Into<String>, seq_num: impl Into<SeqNum>) -> RawMessageBuilder {
        RawMessageBuilder::new(msg_type, seq_num)
    }

    /// Returns the BeginString (8) value.
    ///
    /// # Errors
    /// Returns `TagNotFound` if the tag was removed.
    pub fn begin_string(&self) -> Result<&str, FixError> {
        Ok(self.get(BEGIN_STRING)?.as_str()?)
    }

    /// Returns the BodyLength (9) value.
    ///
    /// # Errors
    /// Returns `TagNotFound` or a decode error if the stored value is not an integer.
    pub fn body_length(&self) -> Result<usize, FixError> {
        Ok(self.get(BODY_LENGTH)?.parse::<usize>()?)
    }

    /// Returns the CheckSum (10) value.
    ///
    /// # Errors
    /// Returns `TagNotFound` or a decode error if the stored value is not a
    /// three-digit checksum.
    pub fn checksum(&self) -> Result<u8, FixError> {
        let field = self.get(CHECK_SUM)?;
        parse_checksum(field.as_bytes()).ok_or_else(|| {
            DecodeError::InvalidFieldValue {
                tag: CHECK_SUM,
                reason: format!("invalid checksum '{}'", String::from_utf8_lossy(field.as_bytes())),
            }
            .into()
        })
    }

    /// Returns the encoded body.
    #[inline]
    #[must_use]
    pub const fn encoded_body(&self) -> &Bytes {
        &self.encoded_body
    }

    /// Replaces the body and recomputes BodyLength and CheckSum.
    pub fn set_encoded_body(&mut self, encoded_body: impl Into<Bytes>) {
        self.encoded_body = encoded_body.into();
        self.fields
            .update(Field::new(BODY_LENGTH, self.encoded_body.len()));
        self.fields
            .update(checksum_field(calculate_checksum(&self.encoded_body)));
    }
}

fn checksum_field(checksum: u8) -> Field {
    Field::from_bytes(CHECK_SUM, Bytes::copy_from_slice(&format_checksum(checksum)))
}

impl FixMessage for RawMessage {
    fn get(&self, tag: u32) -> Result<&Field, FieldSetError> {
        self.fields.get(tag)
    }

    fn get_all(&self, tag: u32) -> Vec<&Field> {
        self.fields.get_all(tag)
    }

    fn insert(&mut self, field: Field) -> Result<(), FieldSetError> {
        self.fields.insert(field)
    }

    fn update(&mut self, field: Field) {
        self.fields.update(field);
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn clear(&mut self) {
        self.fields.clear();
        self.encoded_body = Bytes::new();
    }

    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        Box::new(self.fields.iter())
    }

    fn trailing_bytes(&self) -> &[u8] {
        &self.encoded_body
    }

    fn contains(&self, tag: u32) -> bool {
        self.fields.contains(tag)
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)?;
        write!(f, " <body: {} bytes>", self.encoded_body.len())
    }
}

/// Builder for [`RawMessage`].
///
/// Values left unset are derived: BeginString from [`Settings`], BodyLength
/// and CheckSum from the encoded body, the body itself defaults to empty.
#[derive(Debug, Clone)]
pub struct RawMessageBuilder {
    msg_type: String,
    seq_num: SeqNum,
    begin_string: Option<String>,
    body_length: Option<usize>,
    checksum: Option<u8>,
    encoded_body: Bytes,
}

impl RawMessageBuilder {
    /// Creates a builder for the given MsgType and MsgSeqNum.
    #[must_use]
    pub fn new(msg_type: impl Into<String>, seq_num: impl Into<SeqNum>) -> Self {
        Self {
            msg_type: msg_type.into(),
            seq_num: seq_num.into(),
            begin_string: None,
            body_length: None,
            checksum: None,
            encoded_body: Bytes::new(),
        }
    }

    /// Sets the BeginString.
    #[must_use]
    pub fn begin_string(mut self, begin_string: impl Into<String>) -> Self {
        self.begin_string = Some(begin_string.into());
        self
    }

    /// Sets BodyLength explicitly instead of deriving it from the body.
    #[must_use]
    pub fn body_length(mut self, body_length: usize) -> Self {
        self.body_length = Some(body_length);
        self
    }

    /// Sets CheckSum explicitly instead of deriving it from the body.
    #[must_use]
    pub fn checksum(mut self, checksum: u8) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Sets the encoded body.
    #[must_use]
    pub fn encoded_body(mut self, encoded_body: impl Into<Bytes>) -> Self {
        self.encoded_body = encoded_body.into();
        self
    }

    /// Builds the message, taking BeginString from `settings` when unset.
    #[must_use]
    pub fn build(mut self, settings: &Settings) -> RawMessage {
        let begin_string = self
            .begin_string
            .take()
            .unwrap_or_else(|| settings.begin_string.clone());
        self.finish(begin_string)
    }

    /// Builds the message without configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::Missing` if no BeginString was set.
    pub fn try_build(mut self) -> Result<RawMessage, ConfigError> {
        let begin_string = self
            .begin_string
            .take()
            .ok_or(ConfigError::Missing("begin_string"))?;
        Ok(self.finish(begin_string))
    }

    fn finish(self, begin_string: String) -> RawMessage {
        let body_length = self.body_length.unwrap_or(self.encoded_body.len());
        let checksum = self
            .checksum
            .unwrap_or_else(|| calculate_checksum(&self.encoded_body));

        let mut fields = OrderedDictFieldSet::new();
        fields.update(Field::new(BEGIN_STRING, begin_string));
        fields.update(Field::new(BODY_LENGTH, body_length));
        fields.update(Field::new(MSG_TYPE, self.msg_type));
        fields.update(Field::new(MSG_SEQ_NUM, self.seq_num));
        fields.update(checksum_field(checksum));

        RawMessage {
            fields,
            encoded_body: self.encoded_body,
        }
    }
}
