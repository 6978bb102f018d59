/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Ordered field storage.
//!
//! This module provides:
//! - [`FieldSet`]: Storage interface shared by every message representation
//! - [`ListFieldSet`]: Vector-backed, keeps repeated tags (repeating groups)
//! - [`OrderedDictFieldSet`]: Map-backed, unique tags with O(1) lookup
//!
//! Both implementations keep insertion order, which is the order fields are
//! written to the wire. Cloning a set yields an independent copy.

mod list;
mod ordered;

pub use list::ListFieldSet;
pub use ordered::OrderedDictFieldSet;

use fixkit_core::error::FieldSetError;
use fixkit_core::field::Field;
use std::fmt;

/// Ordered collection of FIX fields.
pub trait FieldSet: Clone + PartialEq + Default + fmt::Debug {
    /// Builds a set by inserting every field in order.
    ///
    /// # Errors
    /// Propagates the first error returned by [`FieldSet::insert`].
    fn from_fields<I>(fields: I) -> Result<Self, FieldSetError>
    where
        I: IntoIterator<Item = Field>,
    {
        let mut set = Self::default();
        for field in fields {
            set.insert(field)?;
        }
        Ok(set)
    }

    /// Returns the first field with the given tag.
    ///
    /// # Errors
    /// Returns `FieldSetError::TagNotFound` if no field has the tag.
    fn get(&self, tag: u32) -> Result<&Field, FieldSetError>;

    /// Returns every field with the given tag, in insertion order.
    fn get_all(&self, tag: u32) -> Vec<&Field>;

    /// Adds a field without touching existing ones.
    ///
    /// # Errors
    /// Implementations that cannot hold repeated tags return
    /// `FieldSetError::DuplicateTags`.
    fn insert(&mut self, field: Field) -> Result<(), FieldSetError>;

    /// Replaces the first field with the same tag, or appends the field.
    fn update(&mut self, field: Field);

    /// Removes every field with the given tag and returns the first one.
    ///
    /// # Errors
    /// Returns `FieldSetError::TagNotFound` if no field has the tag.
    fn remove(&mut self, tag: u32) -> Result<Field, FieldSetError>;

    /// Returns the number of stored fields.
    fn len(&self) -> usize;

    /// Removes all fields.
    fn clear(&mut self);

    /// Iterates over the fields in insertion order.
    fn iter(&self) -> impl Iterator<Item = &Field>;

    /// Returns true if at least one field has the given tag.
    fn contains(&self, tag: u32) -> bool {
        self.get(tag).is_ok()
    }

    /// Returns true if the set holds no fields.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
