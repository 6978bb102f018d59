/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixKit Message
//!
//! Field storage and FIX message representations.
//!
//! This crate provides:
//! - **Field sets**: `ListFieldSet` (repeated tags allowed) and
//!   `OrderedDictFieldSet` (unique tags, map lookup)
//! - **Message semantics**: the `FixMessage` trait, shared by every representation
//! - **Representations**: `GenericMessage`, `OptimizedGenericMessage` and `RawMessage`
//! - **Repeating groups**: templates that let the map-backed message hold groups
//! - **Factory**: `generic_message_factory`, which picks the representation

pub mod factory;
pub mod fieldset;
pub mod generic;
pub mod group;
pub mod message;
pub mod raw;

pub use factory::{AnyMessage, generic_message_factory};
pub use fieldset::{FieldSet, ListFieldSet, OrderedDictFieldSet};
pub use generic::{GenericMessage, OptimizedGenericMessage};
pub use group::{Group, GroupTemplate, GroupTemplates};
pub use message::{FixMessage, Message};
pub use raw::{RawMessage, RawMessageBuilder};
