//! Message Representation Tour
//!
//! This example walks through the message layer:
//! - The factory choosing between map-backed and list-backed messages
//! - Folding repeating groups with group templates
//! - Configured CompID defaults written into a message on first read
//! - Validation, custom message type names and raw messages
//!
//! Run with `RUST_LOG=debug` to see the factory and default logging.

use fixkit_core::tags::{MD_ENTRY_PX, NO_MD_ENTRIES, SENDER_COMP_ID};
use fixkit_message::{FieldSet, FixMessage, GroupTemplates, RawMessage, generic_message_factory};
use fixkit_tagvalue::{Decoder, Encoder};
use tracing::{info, warn};

mod common;
use common::{init_logging, load_settings, market_data_templates, printable};

fn main() -> anyhow::Result<()> {
    init_logging();
    let settings = load_settings()?;
    info!(
        sender = %settings.sender_comp_id,
        target = %settings.target_comp_id,
        "loaded settings"
    );

    // Unique tags: map-backed message
    let mut order = generic_message_factory(
        [(35, "D"), (34, "1"), (11, "ORD-1"), (55, "EUR/USD"), (54, "1"), (38, "1000000")],
        &GroupTemplates::new(),
    )?;
    info!(optimized = order.is_optimized(), "{}", order);

    // SenderCompID is absent; reading it with defaults stores the default
    let sender = order.sender_id_or_default(&settings)?.to_string();
    info!(%sender, stored = order.contains(SENDER_COMP_ID), "sender id resolved");
    order.target_id_or_default(&settings)?;

    let snapshot = [
        (35, "W"),
        (34, "2"),
        (55, "EUR/USD"),
        (268, "2"),
        (269, "0"),
        (270, "1.1010"),
        (271, "500000"),
        (269, "1"),
        (270, "1.1012"),
        (271, "750000"),
    ];

    // Repeated group tags without templates: list-backed message
    let listed = generic_message_factory(snapshot, &GroupTemplates::new())?;
    info!(optimized = listed.is_optimized(), prices = listed.get_all(MD_ENTRY_PX).len(), "{}", listed);

    // Same fields with templates: groups folded, map-backed message
    let folded = generic_message_factory(snapshot, &market_data_templates())?;
    if let Some(optimized) = folded.as_optimized() {
        let group = optimized.group(NO_MD_ENTRIES)?;
        for (i, entry) in group.instances().iter().enumerate() {
            info!(entry = i, fields = entry.len(), "market data entry");
        }
    }

    // Validation
    let partial = generic_message_factory([(34, "3"), (58, "no type yet")], &GroupTemplates::new())?;
    if let Err(e) = partial.validate() {
        warn!("{}", e);
    }

    // Venue-specific type names
    let ack = generic_message_factory([(35, "U1"), (34, "4")], &GroupTemplates::new())?;
    info!(
        standard = ack.name(),
        configured = ack.name_in(&settings.msg_types),
        "custom message type"
    );

    // Wire round trip
    let mut encoder = Encoder::from_settings(&settings);
    let frame = encoder.encode(&order)?;
    info!(frame = %printable(&frame), "encoded");
    let decoded = Decoder::new(frame).decode_message(&GroupTemplates::new())?;
    info!(equal_fields = decoded.get(11)? == order.get(11)?, "{}", decoded);

    // Opaque body
    let raw = RawMessage::builder("D", 5u64)
        .encoded_body(&b"55=EUR/USD\x0154=2\x0138=250000\x01"[..])
        .build(&settings);
    info!(
        body_length = raw.body_length()?,
        checksum = raw.checksum()?,
        "{}",
        raw
    );
    let frame = encoder.encode_raw(&raw)?;
    info!(frame = %printable(&frame), "encoded raw");

    Ok(())
}
