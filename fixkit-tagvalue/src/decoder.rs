/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Zero-copy FIX message decoder.
//!
//! This module provides a decoder that splits a buffer into frames and
//! fields without copying values: every decoded [`Field`] holds a slice of
//! the input `Bytes`.

use crate::encoder::SOH;
use bytes::Bytes;
use fixkit_core::checksum::{calculate_checksum, parse_checksum};
use fixkit_core::error::{DecodeError, FixError};
use fixkit_core::field::Field;
use fixkit_core::tags::{BEGIN_STRING, BODY_LENGTH, CHECK_SUM, MSG_SEQ_NUM, MSG_TYPE};
use fixkit_message::{AnyMessage, FixMessage, GroupTemplates, RawMessage, generic_message_factory};
use memchr::memchr;
use std::ops::Range;
use tracing::{trace, warn};

/// Equals sign delimiter between tag and value.
pub const EQUALS: u8 = b'=';

/// Position of one `tag=value<SOH>` entry in the input.
#[derive(Debug)]
struct Span {
    tag: u32,
    /// Offset of the first tag digit.
    start: usize,
    value: Range<usize>,
}

/// Positions of the standard header of a frame.
#[derive(Debug)]
struct FrameHeader {
    start: usize,
    begin_string: Range<usize>,
    body_length: Range<usize>,
    declared_length: usize,
    body_start: usize,
    msg_type: Range<usize>,
}

/// Zero-copy FIX message decoder.
///
/// The decoder reads consecutive frames from one buffer. Decoded fields
/// share the buffer's storage.
#[derive(Debug, Clone)]
pub struct Decoder {
    /// Input buffer.
    input: Bytes,
    /// Current position in the buffer.
    offset: usize,
    /// Whether to validate checksums.
    validate_checksum: bool,
}

impl Decoder {
    /// Creates a new decoder for the given input buffer.
    ///
    /// # Arguments
    /// * `input` - The FIX message bytes to decode
    #[must_use]
    pub fn new(input: impl Into<Bytes>) -> Self {
        Self {
            input: input.into(),
            offset: 0,
            validate_checksum: true,
        }
    }

    /// Sets whether to validate checksums during decoding.
    ///
    /// BodyLength is checked regardless.
    #[inline]
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Decodes the next frame into its fields, in wire order.
    ///
    /// The result includes BeginString, BodyLength and CheckSum.
    ///
    /// # Errors
    /// Returns `DecodeError` if the frame is malformed, truncated, or fails
    /// BodyLength or checksum validation.
    pub fn decode(&mut self) -> Result<Vec<Field>, DecodeError> {
        let header = self.header()?;

        let mut fields = Vec::with_capacity(16);
        fields.push(self.field(BEGIN_STRING, header.begin_string.clone()));
        fields.push(self.field(BODY_LENGTH, header.body_length.clone()));
        fields.push(self.field(MSG_TYPE, header.msg_type.clone()));

        let trailer = loop {
            let span = self.next_span()?;
            if span.tag == CHECK_SUM {
                break span;
            }
            fields.push(self.field(span.tag, span.value));
        };
        self.check_trailer(&header, &trailer)?;
        fields.push(self.field(CHECK_SUM, trailer.value));

        trace!(
            msg_type = %String::from_utf8_lossy(&self.input[header.msg_type]),
            fields = fields.len(),
            "decoded frame"
        );
        Ok(fields)
    }

    /// Decodes the next frame and builds a message through
    /// [`generic_message_factory`].
    ///
    /// Only a repeated tag makes the factory fall back to the list-backed
    /// message. A frame whose templated group is malformed (a count that is
    /// not an integer or one that does not match the instances) is an error
    /// even though the list-backed message could hold it. Decode with empty
    /// templates to accept such frames.
    ///
    /// # Errors
    /// Returns decoding errors and any non-duplicate construction error.
    pub fn decode_message(&mut self, templates: &GroupTemplates) -> Result<AnyMessage, FixError> {
        let fields = self.decode()?;
        generic_message_factory(fields, templates)
    }

    /// Decodes the next frame as a [`RawMessage`].
    ///
    /// Only BeginString, BodyLength, MsgType and MsgSeqNum are parsed;
    /// everything between MsgSeqNum and CheckSum is kept as the encoded body.
    /// The message's BodyLength and CheckSum are those of that body.
    ///
    /// # Errors
    /// Returns `DecodeError` if the frame is malformed or MsgSeqNum does not
    /// directly follow MsgType.
    pub fn decode_raw(&mut self) -> Result<RawMessage, FixError> {
        let header = self.header()?;

        let seq_num = self.next_span()?;
        if seq_num.tag != MSG_SEQ_NUM {
            return Err(DecodeError::InvalidFieldValue {
                tag: seq_num.tag,
                reason: "expected MsgSeqNum (34) after MsgType (35)".to_string(),
            }
            .into());
        }
        let seq_num = self.field(MSG_SEQ_NUM, seq_num.value).as_u64()?;

        let body_start = self.offset;
        let trailer = loop {
            let span = self.next_span()?;
            if span.tag == CHECK_SUM {
                break span;
            }
        };
        self.check_trailer(&header, &trailer)?;

        let begin_string = self.field(BEGIN_STRING, header.begin_string);
        let msg_type = self.field(MSG_TYPE, header.msg_type);
        let raw = RawMessage::builder(msg_type.as_str()?, seq_num)
            .begin_string(begin_string.as_str()?)
            .encoded_body(self.input.slice(body_start..trailer.start))
            .try_build()?;

        trace!(msg_type = ?raw.msg_type(), body = raw.encoded_body().len(), "decoded raw frame");
        Ok(raw)
    }

    /// Parses the next field from the buffer.
    ///
    /// # Errors
    /// Returns `DecodeError::Incomplete` if the buffer ends mid-field and
    /// `DecodeError::InvalidTag` if the tag is not a number.
    #[inline]
    pub fn next_field(&mut self) -> Result<Field, DecodeError> {
        let span = self.next_span()?;
        Ok(self.field(span.tag, span.value))
    }

    /// Returns the current offset in the buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the remaining bytes in the buffer.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> Bytes {
        self.input.slice(self.offset.min(self.input.len())..)
    }

    /// Returns true if the buffer has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Resets the decoder to the beginning of the buffer.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    fn field(&self, tag: u32, value: Range<usize>) -> Field {
        Field::from_bytes(tag, self.input.slice(value))
    }

    fn next_span(&mut self) -> Result<Span, DecodeError> {
        let start = self.offset;
        let remaining = self.input.get(start..).ok_or(DecodeError::Incomplete)?;

        let eq_pos = memchr(EQUALS, remaining).ok_or(DecodeError::Incomplete)?;
        let tag_bytes = &remaining[..eq_pos];
        let tag = parse_tag(tag_bytes)
            .ok_or_else(|| DecodeError::InvalidTag(String::from_utf8_lossy(tag_bytes).into_owned()))?;

        let value_start = eq_pos + 1;
        let soh_pos = memchr(SOH, &remaining[value_start..]).ok_or(DecodeError::Incomplete)?;

        self.offset = start + value_start + soh_pos + 1;
        Ok(Span {
            tag,
            start,
            value: start + value_start..start + value_start + soh_pos,
        })
    }

    fn header(&mut self) -> Result<FrameHeader, DecodeError> {
        if self.is_empty() {
            return Err(DecodeError::Incomplete);
        }
        let start = self.offset;

        let begin_string = self.next_span()?;
        if begin_string.tag != BEGIN_STRING {
            return Err(DecodeError::InvalidBeginString);
        }

        let body_length = self.next_span()?;
        if body_length.tag != BODY_LENGTH {
            return Err(DecodeError::MissingBodyLength);
        }
        let declared_length = self
            .field(BODY_LENGTH, body_length.value.clone())
            .parse::<usize>()?;

        let body_start = self.offset;
        let msg_type = self.next_span()?;
        if msg_type.tag != MSG_TYPE {
            return Err(DecodeError::MissingMsgType);
        }

        Ok(FrameHeader {
            start,
            begin_string: begin_string.value,
            body_length: body_length.value,
            declared_length,
            body_start,
            msg_type: msg_type.value,
        })
    }

    fn check_trailer(&self, header: &FrameHeader, trailer: &Span) -> Result<(), DecodeError> {
        let actual = trailer.start - header.body_start;
        if actual != header.declared_length {
            return Err(DecodeError::InvalidBodyLength {
                declared: header.declared_length,
                actual,
            });
        }

        if self.validate_checksum {
            let declared = parse_checksum(&self.input[trailer.value.clone()]).ok_or_else(|| {
                DecodeError::InvalidFieldValue {
                    tag: CHECK_SUM,
                    reason: "invalid checksum format".to_string(),
                }
            })?;
            let calculated = calculate_checksum(&self.input[header.start..trailer.start]);
            if calculated != declared {
                warn!(calculated, declared, "checksum mismatch");
                return Err(DecodeError::ChecksumMismatch {
                    calculated,
                    declared,
                });
            }
        }
        Ok(())
    }
}

/// Parses a tag number from ASCII bytes.
///
/// # Returns
/// The parsed tag number, or `None` if invalid.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    bytes.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use fixkit_message::{GroupTemplate, OptimizedGenericMessage};

    fn heartbeat() -> Bytes {
        let msg = OptimizedGenericMessage::new([(35, "0"), (34, "1"), (49, "S"), (56, "T")]).unwrap();
        Encoder::default().encode(&msg).unwrap()
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag(b"8"), Some(8));
        assert_eq!(parse_tag(b"35"), Some(35));
        assert_eq!(parse_tag(b"12345"), Some(12345));
        assert_eq!(parse_tag(b""), None);
        assert_eq!(parse_tag(b"abc"), None);
        assert_eq!(parse_tag(b"12a"), None);
        assert_eq!(parse_tag(b"99999999999"), None);
    }

    #[test]
    fn test_next_field() {
        let mut decoder = Decoder::new(Bytes::from_static(b"8=FIX.4.4\x019=5\x0135=0\x01"));

        let field = decoder.next_field().unwrap();
        assert_eq!(field.tag_number(), 8);
        assert_eq!(field.as_str().unwrap(), "FIX.4.4");
        assert_eq!(decoder.next_field().unwrap().as_str().unwrap(), "5");
        assert_eq!(decoder.next_field().unwrap().as_str().unwrap(), "0");
        assert_eq!(decoder.next_field(), Err(DecodeError::Incomplete));
        assert!(decoder.is_empty());
    }

    #[test]
    fn test_decode_frame() {
        let frame = heartbeat();
        let mut decoder = Decoder::new(frame.clone());
        let fields = decoder.decode().unwrap();

        let tags: Vec<u32> = fields.iter().map(Field::tag_number).collect();
        assert_eq!(tags, vec![8, 9, 35, 34, 49, 56, 10]);
        assert_eq!(fields[0].as_str().unwrap(), "FIX.4.4");
        assert!(decoder.is_empty());
        assert_eq!(decoder.offset(), frame.len());
    }

    #[test]
    fn test_decode_consecutive_frames() {
        let mut buf = heartbeat().to_vec();
        buf.extend_from_slice(&heartbeat());
        let mut decoder = Decoder::new(buf);

        assert!(decoder.decode().is_ok());
        assert!(!decoder.is_empty());
        assert!(decoder.decode().is_ok());
        assert!(decoder.is_empty());
        assert_eq!(decoder.decode(), Err(DecodeError::Incomplete));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut buf = heartbeat().to_vec();
        let len = buf.len();
        buf[len - 2] = if buf[len - 2] == b'9' { b'0' } else { buf[len - 2] + 1 };

        let err = Decoder::new(buf.clone()).decode().unwrap_err();
        assert!(matches!(err, DecodeError::ChecksumMismatch { .. }));
        assert!(
            Decoder::new(buf)
                .with_checksum_validation(false)
                .decode()
                .is_ok()
        );
    }

    #[test]
    fn test_body_length_mismatch() {
        let input = b"8=FIX.4.4\x019=6\x0135=0\x0110=000\x01";
        let err = Decoder::new(Bytes::from_static(input))
            .with_checksum_validation(false)
            .decode()
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidBodyLength {
                declared: 6,
                actual: 5,
            }
        );
    }

    #[test]
    fn test_header_order_errors() {
        let cases: [(&'static [u8], DecodeError); 4] = [
            (b"9=5\x01", DecodeError::InvalidBeginString),
            (b"8=FIX.4.4\x0135=0\x01", DecodeError::MissingBodyLength),
            (b"8=FIX.4.4\x019=5\x0134=1\x01", DecodeError::MissingMsgType),
            (b"8=FIX.4.4\x019=5\x0135=0", DecodeError::Incomplete),
        ];
        for (input, expected) in cases {
            assert_eq!(Decoder::new(Bytes::from_static(input)).decode(), Err(expected));
        }
    }

    #[test]
    fn test_invalid_tag() {
        let err = Decoder::new(Bytes::from_static(b"8=FIX.4.4\x01x=1\x01"))
            .decode()
            .unwrap_err();
        assert_eq!(err, DecodeError::InvalidTag("x".to_string()));
    }

    #[test]
    fn test_decode_message_optimized() {
        let mut decoder = Decoder::new(heartbeat());
        let msg = decoder.decode_message(&GroupTemplates::new()).unwrap();
        assert!(msg.is_optimized());
        assert_eq!(msg.name(), "Heartbeat");
        assert_eq!(msg.sender_id().unwrap(), "S");
    }

    #[test]
    fn test_decode_message_with_groups() {
        let snapshot = fixkit_message::GenericMessage::from_fields([
            (35, "W"),
            (34, "9"),
            (55, "EUR/USD"),
            (268, "2"),
            (269, "0"),
            (270, "1.1010"),
            (269, "1"),
            (270, "1.1012"),
        ])
        .unwrap();
        let frame = Encoder::default().encode(&snapshot).unwrap();

        let plain = Decoder::new(frame.clone())
            .decode_message(&GroupTemplates::new())
            .unwrap();
        assert!(!plain.is_optimized());
        assert_eq!(plain.get_all(270).len(), 2);

        let templates = GroupTemplates::new().with(GroupTemplate::new(268, 269, [270]));
        let folded = Decoder::new(frame).decode_message(&templates).unwrap();
        let optimized = folded.as_optimized().unwrap();
        assert_eq!(optimized.group(268).unwrap().len(), 2);
    }

    #[test]
    fn test_decode_message_malformed_group() {
        let snapshot = fixkit_message::GenericMessage::from_fields([
            (35, "W"),
            (34, "9"),
            (268, "3"),
            (269, "0"),
            (269, "1"),
        ])
        .unwrap();
        let frame = Encoder::default().encode(&snapshot).unwrap();

        let templates = GroupTemplates::new().with(GroupTemplate::new(268, 269, [270]));
        let err = Decoder::new(frame.clone()).decode_message(&templates).unwrap_err();
        assert!(matches!(
            err,
            FixError::Decode(DecodeError::GroupCountMismatch { count_tag: 268, .. })
        ));

        let listed = Decoder::new(frame)
            .decode_message(&GroupTemplates::new())
            .unwrap();
        assert_eq!(listed.get_all(269).len(), 2);
    }

    #[test]
    fn test_decode_raw_round_trip() {
        let msg = OptimizedGenericMessage::new([(35, "D"), (34, "12"), (55, "EUR/USD"), (54, "1")])
            .unwrap();
        let frame = Encoder::default().encode(&msg).unwrap();

        let raw = Decoder::new(frame.clone()).decode_raw().unwrap();
        assert_eq!(raw.msg_type(), Some("D"));
        assert_eq!(raw.seq_num().unwrap(), 12);
        assert_eq!(raw.begin_string().unwrap(), "FIX.4.4");
        assert_eq!(raw.encoded_body().as_ref(), b"55=EUR/USD\x0154=1\x01");
        assert_eq!(raw.body_length().unwrap(), raw.encoded_body().len());
        assert_eq!(raw.checksum().unwrap(), calculate_checksum(raw.encoded_body()));

        let encoded = Encoder::default().encode_raw(&raw).unwrap();
        assert_eq!(encoded, frame);
    }

    #[test]
    fn test_decode_raw_requires_seq_num_after_type() {
        let msg = OptimizedGenericMessage::new([(35, "0"), (49, "S"), (34, "1")]).unwrap();
        let frame = Encoder::default().encode(&msg).unwrap();
        let err = Decoder::new(frame).decode_raw().unwrap_err();
        assert!(matches!(
            err,
            FixError::Decode(DecodeError::InvalidFieldValue { tag: 49, .. })
        ));
    }
}
