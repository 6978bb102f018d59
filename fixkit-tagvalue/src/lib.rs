/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # FixKit Tag-Value
//!
//! FIX tag=value encoding and decoding for FixKit messages.
//!
//! This crate turns messages into SOH-delimited frames and back.
//!
//! ## Features
//!
//! - **Zero-copy decoding**: Field values are slices of the input `Bytes`
//! - **`memchr` scanning**: Fast delimiter search
//! - **Representation choice**: Decoded frames go through the message factory,
//!   or straight into a `RawMessage` when the body is not needed

pub mod decoder;
pub mod encoder;

pub use decoder::Decoder;
pub use encoder::{Encoder, SOH};
pub use fixkit_core::checksum::calculate_checksum;
