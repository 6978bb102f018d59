/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message semantics over a field set.
//!
//! This module provides:
//! - [`FixMessage`]: Message-level accessors (type, name, sequence number,
//!   comp ids, validation) provided on top of a small storage interface
//! - [`Message`]: A message composed over any [`FieldSet`] implementation
//!
//! Every derived attribute is read from the underlying tags; nothing is
//! cached next to the field set.

use crate::fieldset::FieldSet;
use fixkit_core::config::Settings;
use fixkit_core::error::{FieldSetError, FixError, ValidationError};
use fixkit_core::field::Field;
use fixkit_core::msg_type::{MsgType, MsgTypeRegistry, UNKNOWN_NAME};
use fixkit_core::tags::{MSG_SEQ_NUM, MSG_TYPE, SENDER_COMP_ID, TARGET_COMP_ID};
use fixkit_core::types::SeqNum;
use std::fmt;
use tracing::debug;

/// Message-level view of a FIX message.
///
/// Implementors supply field storage; the header semantics are provided.
/// `clone()` is the copy operation and must yield a message that shares no
/// mutable state with the original.
pub trait FixMessage: Clone + PartialEq + fmt::Debug {
    /// Returns the first field with the given tag.
    ///
    /// # Errors
    /// Returns `FieldSetError::TagNotFound` if the tag is absent.
    fn get(&self, tag: u32) -> Result<&Field, FieldSetError>;

    /// Returns every field with the given tag, in order.
    fn get_all(&self, tag: u32) -> Vec<&Field>;

    /// Adds a field.
    ///
    /// # Errors
    /// Returns `FieldSetError::DuplicateTags` if the storage cannot hold the
    /// repeated tag.
    fn insert(&mut self, field: Field) -> Result<(), FieldSetError>;

    /// Overwrites the first field with the same tag, or appends it.
    fn update(&mut self, field: Field);

    /// Returns the number of top-level fields.
    fn len(&self) -> usize;

    /// Removes all fields. Representation metadata such as group templates
    /// is kept.
    fn clear(&mut self);

    /// Iterates over the fields in wire order.
    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_>;

    /// Returns already-encoded bytes that follow the fields on the wire.
    ///
    /// Only representations that keep part of the message encoded return
    /// anything here.
    fn trailing_bytes(&self) -> &[u8] {
        &[]
    }

    /// Returns true if the message holds no fields.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if a field with the tag exists.
    fn contains(&self, tag: u32) -> bool {
        self.get(tag).is_ok()
    }

    /// Returns the MsgType (35) value.
    ///
    /// `None` when the tag is absent or not valid UTF-8; a message under
    /// construction may not have a type yet.
    fn msg_type(&self) -> Option<&str> {
        self.get(MSG_TYPE).ok().and_then(|f| f.as_str().ok())
    }

    /// Returns the standard FIX name of the message type, or `"Unknown"`.
    fn name(&self) -> &'static str {
        self.msg_type()
            .and_then(|t| t.parse::<MsgType>().ok())
            .and_then(|t| t.name().ok())
            .unwrap_or(UNKNOWN_NAME)
    }

    /// Returns the name of the message type according to `registry`, or
    /// `"Unknown"`.
    fn name_in<'r>(&self, registry: &'r MsgTypeRegistry) -> &'r str {
        registry.display_name(self.msg_type())
    }

    /// Returns the MsgSeqNum (34) value.
    ///
    /// # Errors
    /// Returns `TagNotFound` if absent or a decode error if not an integer.
    fn seq_num(&self) -> Result<SeqNum, FixError> {
        Ok(SeqNum::new(self.get(MSG_SEQ_NUM)?.as_u64()?))
    }

    /// Sets MsgSeqNum (34), replacing any existing value.
    fn set_seq_num(&mut self, seq_num: impl Into<SeqNum>) {
        self.update(Field::new(MSG_SEQ_NUM, seq_num.into()));
    }

    /// Returns the SenderCompID (49) value.
    ///
    /// # Errors
    /// Returns `TagNotFound` if absent.
    fn sender_id(&self) -> Result<&str, FixError> {
        Ok(self.get(SENDER_COMP_ID)?.as_str()?)
    }

    /// Sets SenderCompID (49), replacing any existing value.
    fn set_sender_id(&mut self, sender_id: &str) {
        self.update(Field::new(SENDER_COMP_ID, sender_id));
    }

    /// Returns SenderCompID (49), first writing the configured default into
    /// the message if the tag is absent.
    ///
    /// # Errors
    /// Returns a decode error if an existing value is not valid UTF-8.
    fn sender_id_or_default(&mut self, settings: &Settings) -> Result<&str, FixError> {
        if !self.contains(SENDER_COMP_ID) {
            debug!(default = %settings.sender_comp_id, "materialising default SenderCompID");
            self.update(Field::new(SENDER_COMP_ID, &settings.sender_comp_id));
        }
        self.sender_id()
    }

    /// Returns the TargetCompID (56) value.
    ///
    /// # Errors
    /// Returns `TagNotFound` if absent.
    fn target_id(&self) -> Result<&str, FixError> {
        Ok(self.get(TARGET_COMP_ID)?.as_str()?)
    }

    /// Sets TargetCompID (56), replacing any existing value.
    fn set_target_id(&mut self, target_id: &str) {
        self.update(Field::new(TARGET_COMP_ID, target_id));
    }

    /// Returns TargetCompID (56), first writing the configured default into
    /// the message if the tag is absent.
    ///
    /// # Errors
    /// Returns a decode error if an existing value is not valid UTF-8.
    fn target_id_or_default(&mut self, settings: &Settings) -> Result<&str, FixError> {
        if !self.contains(TARGET_COMP_ID) {
            debug!(default = %settings.target_comp_id, "materialising default TargetCompID");
            self.update(Field::new(TARGET_COMP_ID, &settings.target_comp_id));
        }
        self.target_id()
    }

    /// Checks that the message carries a MsgType (35).
    ///
    /// # Errors
    /// Returns a [`ValidationError`] holding the message summary.
    fn validate(&self) -> Result<&Self, ValidationError> {
        if self.contains(MSG_TYPE) {
            Ok(self)
        } else {
            Err(ValidationError {
                reason: "missing MsgType (35)".to_string(),
                message: self.summary(),
            })
        }
    }

    /// Returns a human-readable one-line description of the message.
    fn summary(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_summary(self, &mut out);
        out
    }
}

/// Writes `Name (type): [Tag (n):value | ...]` for a message.
pub(crate) fn write_summary<M, W>(message: &M, out: &mut W) -> fmt::Result
where
    M: FixMessage + ?Sized,
    W: fmt::Write,
{
    match message.msg_type() {
        Some(msg_type) => write!(out, "{} ({}): [", message.name(), msg_type)?,
        None => write!(out, "{}: [", UNKNOWN_NAME)?,
    }
    for (i, field) in message.fields().enumerate() {
        if i > 0 {
            out.write_str(" | ")?;
        }
        let value = String::from_utf8_lossy(field.as_bytes());
        match field.tag().name() {
            Some(name) => write!(out, "{} ({}):{}", name, field.tag(), value)?,
            None => write!(out, "{}:{}", field.tag(), value)?,
        }
    }
    out.write_char(']')
}

/// A FIX message composed over a field set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message<F> {
    fields: F,
}

impl<F: FieldSet> Message<F> {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a message from fields, inserting them in order.
    ///
    /// # Errors
    /// Propagates `FieldSetError::DuplicateTags` from storages that reject
    /// repeated tags.
    pub fn from_fields<I>(fields: I) -> Result<Self, FieldSetError>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        Ok(Self {
            fields: F::from_fields(fields.into_iter().map(Into::into))?,
        })
    }

    /// Wraps an existing field set.
    #[must_use]
    pub const fn from_field_set(fields: F) -> Self {
        Self { fields }
    }

    /// Returns the underlying field set.
    #[inline]
    #[must_use]
    pub const fn field_set(&self) -> &F {
        &self.fields
    }

    /// Returns the underlying field set mutably.
    #[inline]
    pub fn field_set_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    /// Consumes the message and returns its field set.
    #[must_use]
    pub fn into_field_set(self) -> F {
        self.fields
    }

    /// Removes every field with the tag and returns the first one.
    ///
    /// # Errors
    /// Returns `FieldSetError::TagNotFound` if the tag is absent.
    pub fn remove(&mut self, tag: u32) -> Result<Field, FieldSetError> {
        self.fields.remove(tag)
    }
}

impl<F: FieldSet> FixMessage for Message<F> {
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
    }

    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        Box::new(self.fields.iter())
    }

    fn contains(&self, tag: u32) -> bool {
        self.fields.contains(tag)
    }
}

impl<F: FieldSet> fmt::Display for Message<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fieldset::{ListFieldSet, OrderedDictFieldSet};
    use fixkit_core::config::SettingsBuilder;

    fn settings() -> Settings {
        SettingsBuilder::new()
            .sender_comp_id("DEFAULT_SENDER")
            .target_comp_id("DEFAULT_TARGET")
            .build()
            .unwrap()
    }

    fn order() -> Message<OrderedDictFieldSet> {
        Message::from_fields([
            (35, "D"),
            (34, "1"),
            (49, "SENDER"),
            (56, "TARGET"),
        ])
        .unwrap()
    }

    #[test]
    fn test_header_accessors() {
        let msg = order();
        assert_eq!(msg.msg_type(), Some("D"));
        assert_eq!(msg.name(), "NewOrderSingle");
        assert_eq!(msg.seq_num().unwrap(), SeqNum::new(1));
        assert_eq!(msg.sender_id().unwrap(), "SENDER");
        assert_eq!(msg.target_id().unwrap(), "TARGET");
    }

    #[test]
    fn test_type_and_name_without_msg_type() {
        let msg: Message<ListFieldSet> = Message::from_fields([(34, 1u64)]).unwrap();
        assert_eq!(msg.msg_type(), None);
        assert_eq!(msg.name(), "Unknown");
    }

    #[test]
    fn test_name_unknown_type() {
        let msg: Message<ListFieldSet> = Message::from_fields([(35, "ZZ")]).unwrap();
        assert_eq!(msg.msg_type(), Some("ZZ"));
        assert_eq!(msg.name(), "Unknown");
    }

    #[test]
    fn test_name_in_registry() {
        let registry = MsgTypeRegistry::new().with("ZZ", "VenueStatus");
        let msg: Message<ListFieldSet> = Message::from_fields([(35, "ZZ")]).unwrap();
        assert_eq!(msg.name_in(&registry), "VenueStatus");
        assert_eq!(order().name_in(&registry), "NewOrderSingle");
    }

    #[test]
    fn test_seq_num_is_never_defaulted() {
        let msg: Message<ListFieldSet> = Message::from_fields([(35, "0")]).unwrap();
        assert!(msg.seq_num().unwrap_err().is_tag_not_found());

        let bad: Message<ListFieldSet> = Message::from_fields([(34, "one")]).unwrap();
        assert!(matches!(bad.seq_num(), Err(FixError::Decode(_))));
    }

    #[test]
    fn test_set_seq_num_overwrites() {
        let mut msg: Message<ListFieldSet> = Message::from_fields([(35, "0"), (34, "1")]).unwrap();
        msg.set_seq_num(2u64);
        assert_eq!(msg.seq_num().unwrap(), 2);
        assert_eq!(msg.get_all(MSG_SEQ_NUM).len(), 1);
    }

    #[test]
    fn test_sender_id_without_tag_fails() {
        let msg: Message<OrderedDictFieldSet> = Message::from_fields([(35, "0")]).unwrap();
        assert!(msg.sender_id().unwrap_err().is_tag_not_found());
        assert!(msg.target_id().unwrap_err().is_tag_not_found());
    }

    #[test]
    fn test_sender_id_or_default_persists() {
        let settings = settings();
        let mut msg: Message<OrderedDictFieldSet> = Message::from_fields([(35, "0")]).unwrap();

        assert_eq!(msg.sender_id_or_default(&settings).unwrap(), "DEFAULT_SENDER");
        assert_eq!(
            msg.get(SENDER_COMP_ID).unwrap().as_str().unwrap(),
            "DEFAULT_SENDER"
        );
        assert_eq!(msg.target_id_or_default(&settings).unwrap(), "DEFAULT_TARGET");
        assert!(msg.contains(TARGET_COMP_ID));
        assert_eq!(msg.len(), 3);
    }

    #[test]
    fn test_sender_id_or_default_keeps_existing() {
        let settings = settings();
        let mut msg = order();
        assert_eq!(msg.sender_id_or_default(&settings).unwrap(), "SENDER");
        assert_eq!(msg.target_id_or_default(&settings).unwrap(), "TARGET");
        assert_eq!(msg.len(), 4);
    }

    #[test]
    fn test_set_comp_ids() {
        let mut msg = order();
        msg.set_sender_id("NEW_SENDER");
        msg.set_target_id("NEW_TARGET");
        assert_eq!(msg.sender_id().unwrap(), "NEW_SENDER");
        assert_eq!(msg.target_id().unwrap(), "NEW_TARGET");
        assert_eq!(msg.len(), 4);
    }

    #[test]
    fn test_validate() {
        let msg = order();
        assert!(std::ptr::eq(msg.validate().unwrap(), &msg));

        let missing: Message<ListFieldSet> = Message::from_fields([(34, "1"), (49, "S")]).unwrap();
        let err = missing.validate().unwrap_err();
        assert_eq!(err.reason, "missing MsgType (35)");
        assert!(err.message.contains("MsgSeqNum (34):1"));
    }

    #[test]
    fn test_clear_removes_fields() {
        let mut msg = order();
        msg.clear();
        assert!(msg.is_empty());
        assert!(msg.validate().is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = order();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_seq_num(99u64);
        copy.remove(SENDER_COMP_ID).unwrap();

        assert_ne!(copy, original);
        assert_eq!(original.seq_num().unwrap(), 1);
        assert_eq!(original.sender_id().unwrap(), "SENDER");
    }

    #[test]
    fn test_display() {
        let msg: Message<ListFieldSet> =
            Message::from_fields([(35, "D"), (34, "1"), (5001, "x")]).unwrap();
        assert_eq!(
            msg.to_string(),
            "NewOrderSingle (D): [MsgType (35):D | MsgSeqNum (34):1 | 5001:x]"
        );

        let empty: Message<ListFieldSet> = Message::new();
        assert_eq!(empty.to_string(), "Unknown: []");
    }
}
