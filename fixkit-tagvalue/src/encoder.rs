/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message encoder.
//!
//! This module provides an encoder that writes messages in the standard
//! tag=value format. BeginString, BodyLength and CheckSum are produced by
//! the encoder; MsgType is always written first in the body.

use bytes::{BufMut, Bytes, BytesMut};
use fixkit_core::checksum::{calculate_checksum, format_checksum};
use fixkit_core::config::{DEFAULT_BEGIN_STRING, Settings};
use fixkit_core::error::{EncodeError, FixError};
use fixkit_core::field::Field;
use fixkit_core::tags::{BEGIN_STRING, BODY_LENGTH, CHECK_SUM, MSG_SEQ_NUM, MSG_TYPE};
use fixkit_message::{FixMessage, RawMessage};

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// FIX message encoder.
///
/// The body buffer is reused between calls.
#[derive(Debug)]
pub struct Encoder {
    /// Buffer for the message body (between BodyLength and CheckSum).
    body: BytesMut,
    /// BeginString used when the message does not carry one.
    begin_string: String,
}

impl Encoder {
    /// Creates a new encoder with the specified default BeginString.
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string (e.g., "FIX.4.4")
    #[must_use]
    pub fn new(begin_string: impl Into<String>) -> Self {
        Self::with_capacity(begin_string, 256)
    }

    /// Creates a new encoder with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string
    /// * `capacity` - Initial body buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(begin_string: impl Into<String>, capacity: usize) -> Self {
        Self {
            body: BytesMut::with_capacity(capacity),
            begin_string: begin_string.into(),
        }
    }

    /// Creates an encoder using the configured BeginString.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.begin_string.clone())
    }

    /// Returns the default BeginString.
    #[inline]
    #[must_use]
    pub fn begin_string(&self) -> &str {
        &self.begin_string
    }

    /// Encodes a message into a complete frame.
    ///
    /// BeginString is taken from the message when present, otherwise from
    /// the encoder. Any BeginString, BodyLength or CheckSum fields held by
    /// the message are not repeated in the body. The first MsgType is moved
    /// to the front; repeated MsgType fields stay where they are. Bytes the
    /// message keeps encoded (the body of a [`RawMessage`]) follow the fields.
    ///
    /// # Errors
    /// Returns `EncodeError::MissingRequiredField` if the message has no MsgType.
    pub fn encode<M: FixMessage>(&mut self, message: &M) -> Result<Bytes, EncodeError> {
        let msg_type = message
            .get(MSG_TYPE)
            .map_err(|_| EncodeError::MissingRequiredField { tag: MSG_TYPE })?;

        self.body.clear();
        self.put_field(msg_type);
        let mut msg_type_written = false;
        for field in message.fields() {
            match field.tag_number() {
                BEGIN_STRING | BODY_LENGTH | CHECK_SUM => {}
                MSG_TYPE if !msg_type_written => msg_type_written = true,
                _ => self.put_field(field),
            }
        }
        self.body.put_slice(message.trailing_bytes());

        let begin_string = message
            .get(BEGIN_STRING)
            .map_or(self.begin_string.as_bytes(), Field::as_bytes);
        Ok(Self::frame(begin_string, &self.body))
    }

    /// Encodes a raw message: its header fields, then the opaque body.
    ///
    /// MsgType comes first, followed by MsgSeqNum and any other header
    /// fields in stored order. The wire BodyLength and CheckSum cover the
    /// whole frame; the values stored on the message describe only its
    /// encoded body.
    ///
    /// # Errors
    /// Returns `TagNotFound` if MsgType or MsgSeqNum was removed from the message.
    pub fn encode_raw(&mut self, message: &RawMessage) -> Result<Bytes, FixError> {
        message.get(MSG_TYPE)?;
        message.get(MSG_SEQ_NUM)?;
        Ok(self.encode(message)?)
    }

    /// Appends a field to the body.
    #[inline]
    pub fn put_field(&mut self, field: &Field) {
        self.put_raw(field.tag_number(), field.as_bytes());
    }

    /// Appends a field with raw bytes.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - The field value bytes
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        let mut tag_buf = itoa::Buffer::new();
        self.body.put_slice(tag_buf.format(tag).as_bytes());
        self.body.put_u8(b'=');
        self.body.put_slice(value);
        self.body.put_u8(SOH);
    }

    /// Wraps a body with BeginString, BodyLength and CheckSum.
    fn frame(begin_string: &[u8], body: &[u8]) -> Bytes {
        let mut len_buf = itoa::Buffer::new();
        let len_str = len_buf.format(body.len());

        let mut frame = BytesMut::with_capacity(begin_string.len() + len_str.len() + body.len() + 16);
        frame.put_slice(b"8=");
        frame.put_slice(begin_string);
        frame.put_u8(SOH);
        frame.put_slice(b"9=");
        frame.put_slice(len_str.as_bytes());
        frame.put_u8(SOH);
        frame.put_slice(body);

        let checksum = calculate_checksum(&frame);
        frame.put_slice(b"10=");
        frame.put_slice(&format_checksum(checksum));
        frame.put_u8(SOH);

        frame.freeze()
    }

    /// Returns the length of the last encoded body.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.body.clear();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_BEGIN_STRING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixkit_core::config::SettingsBuilder;
    use crate::decoder::Decoder;
    use fixkit_message::{GenericMessage, GroupTemplates, OptimizedGenericMessage};

    fn to_str(frame: &[u8]) -> String {
        String::from_utf8_lossy(frame).replace('\x01', "|")
    }

    #[test]
    fn test_encode_heartbeat() {
        let msg = OptimizedGenericMessage::new([(35, "0"), (34, "1")]).unwrap();
        let frame = Encoder::default().encode(&msg).unwrap();

        let text = to_str(&frame);
        assert!(text.starts_with("8=FIX.4.4|9=10|35=0|34=1|10="));
        let body_end = frame.len() - 7;
        let expected = calculate_checksum(&frame[..body_end]);
        assert_eq!(&frame[body_end + 3..body_end + 6], &format_checksum(expected));
    }

    #[test]
    fn test_msg_type_written_first() {
        let msg = GenericMessage::from_fields([(34, "1"), (49, "S"), (35, "D"), (56, "T")]).unwrap();
        let frame = Encoder::new("FIX.4.2").encode(&msg).unwrap();
        assert!(to_str(&frame).starts_with("8=FIX.4.2|9=20|35=D|34=1|49=S|56=T|10="));
    }

    #[test]
    fn test_message_begin_string_wins() {
        let msg = OptimizedGenericMessage::new([(8, "FIXT.1.1"), (9, "999"), (35, "0"), (10, "000")])
            .unwrap();
        let frame = Encoder::default().encode(&msg).unwrap();
        let text = to_str(&frame);
        assert!(text.starts_with("8=FIXT.1.1|9=5|35=0|10="));
        assert_eq!(text.matches("10=").count(), 1);
    }

    #[test]
    fn test_missing_msg_type() {
        let msg = GenericMessage::from_fields([(34, "1")]).unwrap();
        let err = Encoder::default().encode(&msg).unwrap_err();
        assert_eq!(err, EncodeError::MissingRequiredField { tag: 35 });
    }

    #[test]
    fn test_repeated_tags_are_kept() {
        let msg = GenericMessage::from_fields([
            (35, "W"),
            (268, "2"),
            (269, "0"),
            (269, "1"),
        ])
        .unwrap();
        let frame = Encoder::default().encode(&msg).unwrap();
        assert!(to_str(&frame).contains("|268=2|269=0|269=1|10="));
    }

    #[test]
    fn test_encode_raw() {
        let settings = SettingsBuilder::new()
            .sender_comp_id("S")
            .target_comp_id("T")
            .build()
            .unwrap();
        let raw = RawMessage::builder("D", 4u64)
            .encoded_body(Bytes::from_static(b"55=X\x01"))
            .build(&settings);

        let frame = Encoder::from_settings(&settings).encode_raw(&raw).unwrap();
        assert!(to_str(&frame).starts_with("8=FIX.4.4|9=15|35=D|34=4|55=X|10="));
    }

    #[test]
    fn test_encode_raw_keeps_added_header_fields() {
        let settings = SettingsBuilder::new()
            .sender_comp_id("S")
            .target_comp_id("T")
            .build()
            .unwrap();
        let mut raw = RawMessage::builder("D", 1u64)
            .encoded_body(Bytes::from_static(b"55=X\x01"))
            .build(&settings);
        raw.sender_id_or_default(&settings).unwrap();

        let frame = Encoder::default().encode_raw(&raw).unwrap();
        assert!(to_str(&frame).starts_with("8=FIX.4.4|9=20|35=D|34=1|49=S|55=X|10="));
    }

    #[test]
    fn test_encode_writes_raw_body() {
        let settings = SettingsBuilder::new()
            .sender_comp_id("S")
            .target_comp_id("T")
            .build()
            .unwrap();
        let mut raw = RawMessage::builder("D", 1u64)
            .encoded_body(Bytes::from_static(b"55=X\x01"))
            .build(&settings);
        raw.set_sender_id("S");

        let mut encoder = Encoder::default();
        let generic = encoder.encode(&raw).unwrap();
        let dedicated = encoder.encode_raw(&raw).unwrap();
        assert_eq!(generic, dedicated);
        assert!(to_str(&generic).contains("|49=S|55=X|10="));
    }

    #[test]
    fn test_repeated_msg_type_round_trip() {
        let msg = GenericMessage::from_fields([(35, "D"), (34, "1"), (35, "8")]).unwrap();
        let frame = Encoder::default().encode(&msg).unwrap();
        assert!(to_str(&frame).starts_with("8=FIX.4.4|9=15|35=D|34=1|35=8|10="));

        let decoded = Decoder::new(frame)
            .decode_message(&GroupTemplates::new())
            .unwrap();
        assert!(!decoded.is_optimized());
        let body: Vec<(u32, &str)> = decoded
            .fields()
            .filter(|f| !matches!(f.tag_number(), BEGIN_STRING | BODY_LENGTH | CHECK_SUM))
            .map(|f| (f.tag_number(), f.as_str().unwrap()))
            .collect();
        assert_eq!(body, vec![(35, "D"), (34, "1"), (35, "8")]);
    }

    #[test]
    fn test_encoder_reuse() {
        let mut encoder = Encoder::default();
        let first = OptimizedGenericMessage::new([(35, "0"), (34, "1"), (58, "long text")]).unwrap();
        let second = OptimizedGenericMessage::new([(35, "0"), (34, "2")]).unwrap();

        encoder.encode(&first).unwrap();
        let frame = encoder.encode(&second).unwrap();
        assert!(to_str(&frame).starts_with("8=FIX.4.4|9=10|35=0|34=2|10="));

        encoder.clear();
        assert_eq!(encoder.body_len(), 0);
    }
}
