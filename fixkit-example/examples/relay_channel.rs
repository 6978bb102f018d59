//! Message Relay with Channels
//!
//! This example demonstrates handing messages between tasks:
//! - A reader task decodes frames from a buffer
//! - Each message is cloned and the clone is sent to a processor task
//! - The processor rewrites its copy (new sequence number, new target)
//!   while the reader keeps the original untouched
//! - A raw relay path forwards bodies without parsing them

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use fixkit_core::Settings;
use fixkit_core::tags::POSS_DUP_FLAG;
use fixkit_core::{Field, SeqNum};
use fixkit_message::{AnyMessage, FixMessage, GroupTemplates, RawMessage, generic_message_factory};
use fixkit_tagvalue::{Decoder, Encoder};
use tokio::sync::mpsc;
use tracing::{error, info};

mod common;
use common::{init_logging, load_settings, market_data_templates, printable};

const CHANNEL_BUFFER_SIZE: usize = 64;

/// Builds a buffer holding several encoded frames.
fn inbound_frames(settings: &Settings) -> anyhow::Result<Bytes> {
    let mut encoder = Encoder::from_settings(settings);
    let mut buf = BytesMut::new();

    let messages = [
        generic_message_factory([(35, "0"), (34, "1")], &GroupTemplates::new())?,
        generic_message_factory(
            [(35, "D"), (34, "2"), (11, "ORD-7"), (55, "GBP/USD"), (54, "2")],
            &GroupTemplates::new(),
        )?,
        generic_message_factory(
            [(35, "W"), (34, "3"), (55, "GBP/USD"), (268, "1"), (269, "0"), (270, "1.2701")],
            &GroupTemplates::new(),
        )?,
    ];
    for mut msg in messages {
        msg.sender_id_or_default(settings)?;
        msg.target_id_or_default(settings)?;
        buf.extend_from_slice(&encoder.encode(&msg)?);
    }
    Ok(buf.freeze())
}

/// Rewrites a copy of each message for a downstream counterparty.
async fn processor(
    mut rx: mpsc::Receiver<AnyMessage>,
    settings: Arc<Settings>,
) -> anyhow::Result<Vec<Bytes>> {
    let mut encoder = Encoder::from_settings(&settings);
    let mut next_seq = SeqNum::new(100);
    let mut out = Vec::new();

    while let Some(mut msg) = rx.recv().await {
        msg.set_seq_num(next_seq);
        msg.set_target_id("DOWNSTREAM");
        msg.update(Field::new(POSS_DUP_FLAG, false));
        next_seq = next_seq.next();

        let frame = encoder.encode(&msg)?;
        info!(frame = %printable(&frame), "forwarded");
        out.push(frame);
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let settings = Arc::new(load_settings()?);
    let templates = market_data_templates();

    let (tx, rx) = mpsc::channel::<AnyMessage>(CHANNEL_BUFFER_SIZE);
    let handle = tokio::spawn(processor(rx, Arc::clone(&settings)));

    let input = inbound_frames(&settings)?;
    let mut decoder = Decoder::new(input.clone());
    let mut originals = Vec::new();
    while !decoder.is_empty() {
        let msg = decoder.decode_message(&templates)?;
        info!(optimized = msg.is_optimized(), "received {}", msg);
        if let Err(e) = tx.send(msg.clone()).await {
            error!("processor stopped: {}", e);
            break;
        }
        originals.push(msg);
    }
    drop(tx);

    let forwarded = handle.await??;
    for original in &originals {
        info!(
            seq_num = %original.seq_num()?,
            target = original.target_id()?,
            "original unchanged"
        );
    }
    info!(count = forwarded.len(), "relay finished");

    // Pass-through: only the header is parsed, the body is forwarded as is
    let mut raw_decoder = Decoder::new(input);
    let mut encoder = Encoder::from_settings(&settings);
    while !raw_decoder.is_empty() {
        let raw: RawMessage = raw_decoder.decode_raw()?;
        let frame = encoder.encode_raw(&raw)?;
        info!(
            msg_type = raw.msg_type().unwrap_or_default(),
            body = raw.encoded_body().len(),
            frame = %printable(&frame),
            "raw relay"
        );
    }

    Ok(())
}
