/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! General-purpose messages.
//!
//! [`GenericMessage`] keeps every field in a list and accepts repeated tags.
//! [`OptimizedGenericMessage`] keeps top-level fields in an ordered map with
//! unique tags; repeating groups described by its [`GroupTemplates`] are
//! folded into [`Group`]s instead of colliding in the map.

use crate::fieldset::{FieldSet, ListFieldSet, OrderedDictFieldSet};
use crate::group::{Group, GroupTemplates};
use crate::message::{FixMessage, Message, write_summary};
use fixkit_core::error::{FieldSetError, FixError};
use fixkit_core::field::Field;
use indexmap::IndexMap;
use std::fmt;
use tracing::debug;

/// List-backed message that tolerates repeated tags.
pub type GenericMessage = Message<ListFieldSet>;

/// Map-backed message with unique top-level tags.
///
/// Equality compares the fields, the parsed groups and the group templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizedGenericMessage {
    fields: OrderedDictFieldSet,
    groups: IndexMap<u32, Group>,
    group_templates: GroupTemplates,
}

impl OptimizedGenericMessage {
    /// Builds a message without group templates.
    ///
    /// # Errors
    /// Returns `FieldSetError::DuplicateTags` if any tag repeats.
    pub fn new<I>(fields: I) -> Result<Self, FixError>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        Self::with_templates(fields, &GroupTemplates::new())
    }

    /// Builds a message, folding the repeating groups known to `templates`.
    ///
    /// A count field whose tag has a template is stored as a regular field
    /// and the member fields that follow it are parsed into a [`Group`].
    ///
    /// # Errors
    /// - `FieldSetError::DuplicateTags` if a top-level tag, or a tag within
    ///   one group instance, repeats
    /// - `DecodeError` if a group count is not an integer or does not match
    ///   the number of instances
    pub fn with_templates<I>(fields: I, templates: &GroupTemplates) -> Result<Self, FixError>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        let mut message = Self {
            group_templates: templates.clone(),
            ..Self::default()
        };
        let mut fields = fields.into_iter().map(Into::into).peekable();

        while let Some(field) = fields.next() {
            let Some(template) = templates.get(field.tag_number()) else {
                message.fields.insert(field)?;
                continue;
            };
            let count_tag = field.tag_number();
            let expected = field.parse::<usize>()?;
            message.fields.insert(field)?;
            let group = Group::parse(template, expected, &mut fields)?;
            message.groups.insert(count_tag, group);
        }

        Ok(message)
    }

    /// Returns the parsed group for a count tag.
    ///
    /// # Errors
    /// Returns `FieldSetError::TagNotFound` if the message has no such group.
    pub fn group(&self, count_tag: u32) -> Result<&Group, FieldSetError> {
        self.groups
            .get(&count_tag)
            .ok_or(FieldSetError::TagNotFound { tag: count_tag })
    }

    /// Iterates over the parsed groups in wire order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Returns the group templates used to build this message.
    #[must_use]
    pub const fn group_templates(&self) -> &GroupTemplates {
        &self.group_templates
    }

    /// Returns the top-level field set, without group members.
    #[must_use]
    pub const fn field_set(&self) -> &OrderedDictFieldSet {
        &self.fields
    }

    /// Removes a top-level field, and its group if the tag is a count tag.
    ///
    /// # Errors
    /// Returns `FieldSetError::TagNotFound` if the tag is absent.
    pub fn remove(&mut self, tag: u32) -> Result<Field, FieldSetError> {
        let field = self.fields.remove(tag)?;
        self.groups.shift_remove(&tag);
        Ok(field)
    }
}

impl FixMessage for OptimizedGenericMessage {
    fn get(&self, tag: u32) -> Result<&Field, FieldSetError> {
        self.fields.get(tag)
    }

    fn get_all(&self, tag: u32) -> Vec<&Field> {
        let mut all = self.fields.get_all(tag);
        for group in self.groups.values() {
            all.extend(group.fields().filter(|f| f.tag_number() == tag));
        }
        all
    }

    fn insert(&mut self, field: Field) -> Result<(), FieldSetError> {
        self.fields.insert(field)
    }

    /// Overwrites or appends a top-level field.
    ///
    /// Updating a count tag keeps its parsed group only while the new count
    /// still matches the number of instances; otherwise the group is
    /// discarded, so `fields()` never emits members the count disowns.
    fn update(&mut self, field: Field) {
        let tag = field.tag_number();
        if let Some(group) = self.groups.get(&tag) {
            if field.parse::<usize>().ok() != Some(group.len()) {
                debug!(count_tag = tag, "count changed, discarding parsed group");
                self.groups.shift_remove(&tag);
            }
        }
        self.fields.update(field);
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn clear(&mut self) {
        self.fields.clear();
        self.groups.clear();
    }

    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        Box::new(self.fields.iter().flat_map(move |field| {
            let members = self
                .groups
                .get(&field.tag_number())
                .into_iter()
                .flat_map(Group::fields);
            std::iter::once(field).chain(members)
        }))
    }

    fn contains(&self, tag: u32) -> bool {
        self.fields.contains(tag)
    }
}

impl fmt::Display for OptimizedGenericMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupTemplate;
    use fixkit_core::error::DecodeError;
    use fixkit_core::tags::{MD_ENTRY_PX, MD_ENTRY_SIZE, MD_ENTRY_TYPE, NO_MD_ENTRIES};

    fn md_templates() -> GroupTemplates {
        GroupTemplates::new().with(GroupTemplate::new(
            NO_MD_ENTRIES,
            MD_ENTRY_TYPE,
            [MD_ENTRY_PX, MD_ENTRY_SIZE],
        ))
    }

    fn snapshot() -> Vec<(u32, &'static str)> {
        vec![
            (35, "W"),
            (34, "2"),
            (55, "EUR/USD"),
            (268, "2"),
            (269, "0"),
            (270, "1.1010"),
            (271, "500000"),
            (269, "1"),
            (270, "1.1012"),
            (58, "snapshot"),
        ]
    }

    #[test]
    fn test_unique_tags_len_matches_pairs() {
        let pairs = [(35, "D"), (34, "1"), (49, "SENDER"), (56, "TARGET"), (55, "EUR/USD")];
        let msg = OptimizedGenericMessage::new(pairs).unwrap();
        assert_eq!(msg.len(), pairs.len());
        assert_eq!(msg.name(), "NewOrderSingle");
    }

    #[test]
    fn test_duplicate_tag_fails() {
        let err = OptimizedGenericMessage::new([(35, "D"), (34, "1"), (35, "D")]).unwrap_err();
        assert!(err.is_duplicate_tags());
    }

    #[test]
    fn test_group_without_template_fails() {
        let err = OptimizedGenericMessage::new(snapshot()).unwrap_err();
        assert!(err.is_duplicate_tags());
    }

    #[test]
    fn test_groups_folded_with_templates() {
        let msg = OptimizedGenericMessage::with_templates(snapshot(), &md_templates()).unwrap();

        assert_eq!(msg.len(), 5);
        assert_eq!(msg.get(NO_MD_ENTRIES).unwrap().as_u64().unwrap(), 2);
        assert_eq!(msg.get(58).unwrap().as_str().unwrap(), "snapshot");

        let group = msg.group(NO_MD_ENTRIES).unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.instance(1).unwrap().get(MD_ENTRY_SIZE).is_err());

        let prices: Vec<&str> = msg
            .get_all(MD_ENTRY_PX)
            .into_iter()
            .map(|f| f.as_str().unwrap())
            .collect();
        assert_eq!(prices, vec!["1.1010", "1.1012"]);
    }

    #[test]
    fn test_fields_restore_wire_order() {
        let msg = OptimizedGenericMessage::with_templates(snapshot(), &md_templates()).unwrap();
        let pairs: Vec<(u32, &str)> = msg
            .fields()
            .map(|f| (f.tag_number(), f.as_str().unwrap()))
            .collect();
        assert_eq!(pairs, snapshot());
    }

    #[test]
    fn test_group_count_mismatch() {
        let fields = [(35, "W"), (268, "3"), (269, "0"), (269, "1")];
        let err = OptimizedGenericMessage::with_templates(fields, &md_templates()).unwrap_err();
        assert!(matches!(
            err,
            FixError::Decode(DecodeError::GroupCountMismatch {
                count_tag: 268,
                expected: 3,
                actual: 2,
            })
        ));
    }

    #[test]
    fn test_equality_includes_templates() {
        let fields = [(35, "0"), (34, "1")];
        let plain = OptimizedGenericMessage::new(fields).unwrap();
        let templated = OptimizedGenericMessage::with_templates(fields, &md_templates()).unwrap();
        assert_ne!(plain, templated);
        assert_eq!(templated, templated.clone());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = OptimizedGenericMessage::with_templates(snapshot(), &md_templates()).unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.update(Field::new(55, "GBP/USD"));
        copy.remove(NO_MD_ENTRIES).unwrap();

        assert_ne!(copy, original);
        assert_eq!(original.get(55).unwrap().as_str().unwrap(), "EUR/USD");
        assert_eq!(original.group(NO_MD_ENTRIES).unwrap().len(), 2);
        assert_eq!(copy.group_templates(), original.group_templates());
    }

    #[test]
    fn test_update_count_tag() {
        let mut msg = OptimizedGenericMessage::with_templates(snapshot(), &md_templates()).unwrap();

        msg.update(Field::new(NO_MD_ENTRIES, 2u64));
        assert_eq!(msg.group(NO_MD_ENTRIES).unwrap().len(), 2);

        msg.update(Field::new(NO_MD_ENTRIES, 1u64));
        assert!(msg.group(NO_MD_ENTRIES).is_err());
        let tags: Vec<u32> = msg.fields().map(Field::tag_number).collect();
        assert_eq!(tags, vec![35, 34, 55, 268, 58]);
        assert!(msg.get_all(MD_ENTRY_PX).is_empty());
    }

    #[test]
    fn test_clear_keeps_templates() {
        let mut msg = OptimizedGenericMessage::with_templates(snapshot(), &md_templates()).unwrap();
        msg.clear();
        assert!(msg.is_empty());
        assert_eq!(msg.groups().count(), 0);
        assert_eq!(msg.group_templates().len(), 1);
    }

    #[test]
    fn test_generic_message_keeps_duplicates() {
        let msg = GenericMessage::from_fields(snapshot()).unwrap();
        assert_eq!(msg.len(), snapshot().len());
        assert_eq!(msg.get_all(MD_ENTRY_TYPE).len(), 2);
    }
}
