/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixKit Core
//!
//! Core types, configuration and error definitions shared by all FixKit crates.
//!
//! This crate provides the leaf building blocks of the message model:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Field types**: `Field`, `FieldTag` and `FieldValue` with typed accessors
//! - **Tags**: Standard FIX tag numbers and names
//! - **Message types**: `MsgType` and the `MsgTypeRegistry` name lookup
//! - **Checksum**: The FIX modulo-256 checksum
//! - **Configuration**: `Settings` holding BeginString and CompID defaults

pub mod checksum;
pub mod config;
pub mod error;
pub mod field;
pub mod msg_type;
pub mod tags;
pub mod types;

pub use checksum::calculate_checksum;
pub use config::{Settings, SettingsBuilder};
pub use error::{
    ConfigError, DecodeError, EncodeError, FieldSetError, FixError, Result, UnknownType,
    ValidationError,
};
pub use field::{Field, FieldTag, FieldValue};
pub use msg_type::{MsgType, MsgTypeRegistry, UNKNOWN_NAME};
pub use types::{CompId, SeqNum};
