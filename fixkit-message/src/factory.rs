/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Representation-choosing message factory.

use crate::generic::{GenericMessage, OptimizedGenericMessage};
use crate::group::GroupTemplates;
use crate::message::FixMessage;
use fixkit_core::error::{FieldSetError, FixError};
use fixkit_core::field::Field;
use std::fmt;
use tracing::debug;

/// A message in whichever representation the factory chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyMessage {
    /// Map-backed message, all top-level tags unique.
    Optimized(OptimizedGenericMessage),
    /// List-backed message holding repeated tags.
    Generic(GenericMessage),
}

impl AnyMessage {
    /// Returns true if the map-backed representation was chosen.
    #[must_use]
    pub const fn is_optimized(&self) -> bool {
        matches!(self, Self::Optimized(_))
    }

    /// Returns the map-backed message, if chosen.
    #[must_use]
    pub const fn as_optimized(&self) -> Option<&OptimizedGenericMessage> {
        match self {
            Self::Optimized(msg) => Some(msg),
            Self::Generic(_) => None,
        }
    }

    /// Returns the list-backed message, if chosen.
    #[must_use]
    pub const fn as_generic(&self) -> Option<&GenericMessage> {
        match self {
            Self::Generic(msg) => Some(msg),
            Self::Optimized(_) => None,
        }
    }
}

/// Builds a message, preferring the map-backed representation.
///
/// [`OptimizedGenericMessage`] is attempted first. If it rejects the input
/// with `DuplicateTags`, the same fields are used to build a
/// [`GenericMessage`], which keeps every entry in its original order.
///
/// # Errors
/// Any other construction error (for example a malformed group count) is
/// returned unchanged.
pub fn generic_message_factory<I>(fields: I, templates: &GroupTemplates) -> Result<AnyMessage, FixError>
where
    I: IntoIterator,
    I::Item: Into<Field>,
{
    let fields: Vec<Field> = fields.into_iter().map(Into::into).collect();

    match OptimizedGenericMessage::with_templates(fields.iter().cloned(), templates) {
        Ok(msg) => Ok(AnyMessage::Optimized(msg)),
        Err(FixError::FieldSet(FieldSetError::DuplicateTags { tag, .. })) => {
            debug!(tag, fields = fields.len(), "duplicate tag, using list-backed message");
            Ok(AnyMessage::Generic(GenericMessage::from_fields(fields)?))
        }
        Err(e) => Err(e),
    }
}

impl FixMessage for AnyMessage {
    fn get(&self, tag: u32) -> Result<&Field, FieldSetError> {
        match self {
            Self::Optimized(msg) => msg.get(tag),
            Self::Generic(msg) => msg.get(tag),
        }
    }

    fn get_all(&self, tag: u32) -> Vec<&Field> {
        match self {
            Self::Optimized(msg) => msg.get_all(tag),
            Self::Generic(msg) => msg.get_all(tag),
        }
    }

    fn insert(&mut self, field: Field) -> Result<(), FieldSetError> {
        match self {
            Self::Optimized(msg) => msg.insert(field),
            Self::Generic(msg) => msg.insert(field),
        }
    }

    fn update(&mut self, field: Field) {
        match self {
            Self::Optimized(msg) => msg.update(field),
            Self::Generic(msg) => msg.update(field),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Optimized(msg) => msg.len(),
            Self::Generic(msg) => msg.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Optimized(msg) => msg.clear(),
            Self::Generic(msg) => msg.clear(),
        }
    }

    fn fields(&self) -> Box<dyn Iterator<Item = &Field> + '_> {
        match self {
            Self::Optimized(msg) => msg.fields(),
            Self::Generic(msg) => msg.fields(),
        }
    }

    fn contains(&self, tag: u32) -> bool {
        match self {
            Self::Optimized(msg) => msg.contains(tag),
            Self::Generic(msg) => msg.contains(tag),
        }
    }
}

impl fmt::Display for AnyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimized(msg) => fmt::Display::fmt(msg, f),
            Self::Generic(msg) => fmt::Display::fmt(msg, f),
        }
    }
}

impl From<OptimizedGenericMessage> for AnyMessage {
    fn from(msg: OptimizedGenericMessage) -> Self {
        Self::Optimized(msg)
    }
}

impl From<GenericMessage> for AnyMessage {
    fn from(msg: GenericMessage) -> Self {
        Self::Generic(msg)
    }
}
