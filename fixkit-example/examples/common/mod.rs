//! Common utilities shared across examples.

#![allow(dead_code)]

use std::env;

use fixkit_core::Settings;
use fixkit_core::SettingsBuilder;
use fixkit_core::tags::{MD_ENTRY_PX, MD_ENTRY_SIZE, MD_ENTRY_TYPE, NO_MD_ENTRIES};
use fixkit_message::{GroupTemplate, GroupTemplates};

/// Environment variable naming a TOML settings file.
pub const CONFIG_ENV: &str = "FIXKIT_CONFIG";

/// Loads settings from `FIXKIT_CONFIG` if set, otherwise from
/// `FIX_SENDER` / `FIX_TARGET` with built-in fallbacks.
pub fn load_settings() -> anyhow::Result<Settings> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(Settings::from_file(path)?);
    }
    let settings = SettingsBuilder::new()
        .sender_comp_id(env::var("FIX_SENDER").unwrap_or_else(|_| "BUYSIDE".to_string()))
        .target_comp_id(env::var("FIX_TARGET").unwrap_or_else(|_| "SELLSIDE".to_string()))
        .msg_type_name("U1", "VenueOrderAck")
        .build()?;
    Ok(settings)
}

/// Group templates for market data snapshots.
pub fn market_data_templates() -> GroupTemplates {
    GroupTemplates::new().with(GroupTemplate::new(
        NO_MD_ENTRIES,
        MD_ENTRY_TYPE,
        [MD_ENTRY_PX, MD_ENTRY_SIZE],
    ))
}

/// Renders a frame with `|` in place of SOH.
pub fn printable(frame: &[u8]) -> String {
    String::from_utf8_lossy(frame).replace('\x01', "|")
}

/// Initializes logging for examples.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
