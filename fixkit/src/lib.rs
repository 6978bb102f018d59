/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixKit
//!
//! FIX message representations for Rust.
//!
//! FixKit models a FIX message as an ordered set of tag/value fields and
//! layers message semantics on top: type and name lookup, sequence numbers,
//! comp ids with configured defaults, and validation.
//!
//! ## Features
//!
//! - **Two field stores**: a list that keeps repeated tags and an ordered map
//!   with unique tags
//! - **Representation choice**: the factory prefers the map and falls back to
//!   the list when tags repeat
//! - **Opaque bodies**: `RawMessage` keeps only the header and trailer structured
//! - **Zero-copy codec**: tag=value frames decoded into shared `Bytes`
//!
//! ## Quick Start
//!
//! ```rust
//! use fixkit::prelude::*;
//!
//! let msg = generic_message_factory(
//!     [(35, "D"), (34, "1"), (49, "SENDER"), (56, "TARGET")],
//!     &GroupTemplates::new(),
//! )?;
//! assert_eq!(msg.name(), "NewOrderSingle");
//!
//! let frame = Encoder::default().encode(&msg)?;
//! let decoded = Decoder::new(frame).decode_message(&GroupTemplates::new())?;
//! assert_eq!(decoded.seq_num()?, 1);
//! # Ok::<(), FixError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Fields, tags, message types, configuration and errors
//! - [`message`]: Field sets, message representations and the factory
//! - [`tagvalue`]: tag=value encoding and decoding

pub mod core {
    //! Fields, tags, message types, configuration and errors.
    pub use fixkit_core::*;
}

pub mod message {
    //! Field sets, message representations and the factory.
    pub use fixkit_message::*;
}

pub mod tagvalue {
    //! tag=value encoding and decoding.
    pub use fixkit_tagvalue::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixkit_core::{
        CompId, ConfigError, DecodeError, EncodeError, Field, FieldSetError, FieldTag, FieldValue,
        FixError, MsgType, MsgTypeRegistry, Result, SeqNum, Settings, SettingsBuilder,
        UnknownType, ValidationError,
    };

    // Messages
    pub use fixkit_message::{
        AnyMessage, FieldSet, FixMessage, GenericMessage, Group, GroupTemplate, GroupTemplates,
        ListFieldSet, Message, OptimizedGenericMessage, OrderedDictFieldSet, RawMessage,
        generic_message_factory,
    };

    // Tag-value encoding
    pub use fixkit_tagvalue::{Decoder, Encoder, calculate_checksum};
}
