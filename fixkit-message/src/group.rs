/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Repeating group templates and parsed groups.
//!
//! A [`GroupTemplate`] names the count tag of a repeating group (for example
//! `NoMDEntries (268)`) and the member tags of one instance, the first of
//! which delimits instances. [`OptimizedGenericMessage`] uses templates to
//! fold repeating groups out of its unique-tag field set, so group-bearing
//! messages can still use the map-backed representation.
//!
//! [`OptimizedGenericMessage`]: crate::generic::OptimizedGenericMessage

use crate::fieldset::{FieldSet, OrderedDictFieldSet};
use fixkit_core::error::{DecodeError, FixError};
use fixkit_core::field::Field;
use indexmap::IndexMap;
use std::iter::Peekable;
use std::sync::Arc;

/// Layout of one repeating group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTemplate {
    count_tag: u32,
    member_tags: Vec<u32>,
}

impl GroupTemplate {
    /// Creates a template.
    ///
    /// # Arguments
    /// * `count_tag` - The NumInGroup tag announcing the number of instances
    /// * `delimiter_tag` - The tag that starts every instance
    /// * `other_tags` - The remaining member tags of an instance
    #[must_use]
    pub fn new(count_tag: u32, delimiter_tag: u32, other_tags: impl IntoIterator<Item = u32>) -> Self {
        let mut member_tags = vec![delimiter_tag];
        member_tags.extend(other_tags);
        Self {
            count_tag,
            member_tags,
        }
    }

    /// Returns the NumInGroup tag.
    #[inline]
    #[must_use]
    pub const fn count_tag(&self) -> u32 {
        self.count_tag
    }

    /// Returns the tag that starts every instance.
    #[inline]
    #[must_use]
    pub fn delimiter_tag(&self) -> u32 {
        self.member_tags[0]
    }

    /// Returns every member tag, delimiter first.
    #[inline]
    #[must_use]
    pub fn member_tags(&self) -> &[u32] {
        &self.member_tags
    }

    /// Returns true if `tag` belongs to an instance of this group.
    #[inline]
    #[must_use]
    pub fn contains(&self, tag: u32) -> bool {
        self.member_tags.contains(&tag)
    }
}

/// Set of group templates keyed by count tag.
///
/// Cloning is cheap; adding a template to a clone does not affect the
/// original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTemplates {
    templates: Arc<IndexMap<u32, GroupTemplate>>,
}

impl GroupTemplates {
    /// Creates an empty template set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template and returns the set.
    #[must_use]
    pub fn with(mut self, template: GroupTemplate) -> Self {
        self.add(template);
        self
    }

    /// Adds a template, replacing any template with the same count tag.
    pub fn add(&mut self, template: GroupTemplate) {
        Arc::make_mut(&mut self.templates).insert(template.count_tag, template);
    }

    /// Returns the template for a count tag.
    #[must_use]
    pub fn get(&self, count_tag: u32) -> Option<&GroupTemplate> {
        self.templates.get(&count_tag)
    }

    /// Returns the number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if no templates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// A parsed repeating group: one unique-tag field set per instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    count_tag: u32,
    instances: Vec<OrderedDictFieldSet>,
}

impl Group {
    /// Consumes the instances of a group from `fields`.
    ///
    /// Reading stops at the first field that is not a member of `template`.
    ///
    /// # Errors
    /// - `DecodeError::InvalidFieldValue` if an instance does not start with the delimiter
    /// - `FieldSetError::DuplicateTags` if a tag repeats within one instance
    /// - `DecodeError::GroupCountMismatch` if the number of instances differs from `expected`
    pub(crate) fn parse<I>(
        template: &GroupTemplate,
        expected: usize,
        fields: &mut Peekable<I>,
    ) -> Result<Self, FixError>
    where
        I: Iterator<Item = Field>,
    {
        let mut instances: Vec<OrderedDictFieldSet> = Vec::with_capacity(expected);
        while let Some(field) = fields.next_if(|f| template.contains(f.tag_number())) {
            if field.tag_number() == template.delimiter_tag() {
                instances.push(OrderedDictFieldSet::new());
            }
            let current = instances
                .last_mut()
                .ok_or_else(|| DecodeError::InvalidFieldValue {
                    tag: field.tag_number(),
                    reason: format!(
                        "group {} instance must start with tag {}",
                        template.count_tag,
                        template.delimiter_tag()
                    ),
                })?;
            current.insert(field)?;
        }

        if instances.len() != expected {
            return Err(DecodeError::GroupCountMismatch {
                count_tag: template.count_tag,
                expected,
                actual: instances.len(),
            }
            .into());
        }

        Ok(Self {
            count_tag: template.count_tag,
            instances,
        })
    }

    /// Returns the NumInGroup tag of this group.
    #[inline]
    #[must_use]
    pub const fn count_tag(&self) -> u32 {
        self.count_tag
    }

    /// Returns the instances in wire order.
    #[inline]
    #[must_use]
    pub fn instances(&self) -> &[OrderedDictFieldSet] {
        &self.instances
    }

    /// Returns one instance.
    #[must_use]
    pub fn instance(&self, index: usize) -> Option<&OrderedDictFieldSet> {
        self.instances.get(index)
    }

    /// Returns the number of instances.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if the group has no instances.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates over every field of every instance, in wire order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.instances.iter().flat_map(|instance| instance.iter())
    }
}
