/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

use super::FieldSet;
use fixkit_core::error::FieldSetError;
use fixkit_core::field::Field;
use indexmap::IndexMap;

/// Field set backed by an insertion-ordered map.
///
/// Each tag appears at most once. [`FieldSet::insert`] rejects a tag that is
/// already present with `FieldSetError::DuplicateTags`; [`FieldSet::update`]
/// is the explicit way to overwrite a value in place.
#[derive(Debug, Clone, Default)]
pub struct OrderedDictFieldSet {
    fields: IndexMap<u32, Field>,
}

impl OrderedDictFieldSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.fields.keys().copied()
    }
}

impl FieldSet for OrderedDictFieldSet {
    fn get(&self, tag: u32) -> Result<&Field, FieldSetError> {
        self.fields.get(&tag).ok_or(FieldSetError::TagNotFound { tag })
    }

    fn get_all(&self, tag: u32) -> Vec<&Field> {
        self.fields.get(&tag).into_iter().collect()
    }

    fn insert(&mut self, field: Field) -> Result<(), FieldSetError> {
        let tag = field.tag_number();
        if let Some(existing) = self.fields.get(&tag) {
            return Err(FieldSetError::DuplicateTags {
                tag,
                existing: String::from_utf8_lossy(existing.as_bytes()).into_owned(),
                new: String::from_utf8_lossy(field.as_bytes()).into_owned(),
            });
        }
        self.fields.insert(tag, field);
        Ok(())
    }

    fn update(&mut self, field: Field) {
        self.fields.insert(field.tag_number(), field);
    }

    fn remove(&mut self, tag: u32) -> Result<Field, FieldSetError> {
        self.fields
            .shift_remove(&tag)
            .ok_or(FieldSetError::TagNotFound { tag })
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn clear(&mut self) {
        self.fields.clear();
    }

    fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    fn contains(&self, tag: u32) -> bool {
        self.fields.contains_key(&tag)
    }
}

// IndexMap equality ignores order; field sets serialize in order, so compare in order.
impl PartialEq for OrderedDictFieldSet {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.values().eq(other.fields.values())
    }
}

impl Eq for OrderedDictFieldSet {}
