/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Process-wide message defaults.
//!
//! [`Settings`] is created once at start-up, either with [`SettingsBuilder`]
//! or from a TOML document, and then passed by reference (or inside an
//! `Arc`) to every operation that needs a default BeginString or CompID.
//! It is read-only after construction.
//!
//! ```toml
//! begin_string = "FIX.4.4"
//! sender_comp_id = "SENDER"
//! target_comp_id = "TARGET"
//!
//! [msg_types]
//! U1 = "VenueOrderAck"
//! ```

use crate::error::ConfigError;
use crate::msg_type::MsgTypeRegistry;
use crate::types::CompId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// BeginString used when none is configured.
pub const DEFAULT_BEGIN_STRING: &str = "FIX.4.4";

fn default_begin_string() -> String {
    DEFAULT_BEGIN_STRING.to_string()
}

/// Defaults injected into messages when explicit values are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// FIX version BeginString (tag 8).
    #[serde(default = "default_begin_string")]
    pub begin_string: String,
    /// Sender CompID (tag 49).
    pub sender_comp_id: CompId,
    /// Target CompID (tag 56).
    pub target_comp_id: CompId,
    /// Extra message type names.
    #[serde(default)]
    pub msg_types: MsgTypeRegistry,
}

impl Settings {
    /// Creates settings with the required comp ids and the default BeginString.
    #[must_use]
    pub fn new(sender_comp_id: CompId, target_comp_id: CompId) -> Self {
        Self {
            begin_string: default_begin_string(),
            sender_comp_id,
            target_comp_id,
            msg_types: MsgTypeRegistry::new(),
        }
    }

    /// Parses settings from a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the document is malformed or a comp id
    /// is too long.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_toml_str(&content)
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    begin_string: Option<String>,
    sender_comp_id: Option<String>,
    target_comp_id: Option<String>,
    msg_types: MsgTypeRegistry,
}

impl SettingsBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the FIX version.
    #[must_use]
    pub fn begin_string(mut self, version: impl Into<String>) -> Self {
        self.begin_string = Some(version.into());
        self
    }

    /// Sets the sender CompID.
    #[must_use]
    pub fn sender_comp_id(mut self, id: impl Into<String>) -> Self {
        self.sender_comp_id = Some(id.into());
        self
    }

    /// Sets the target CompID.
    #[must_use]
    pub fn target_comp_id(mut self, id: impl Into<String>) -> Self {
        self.target_comp_id = Some(id.into());
        self
    }

    /// Registers a custom message type name.
    #[must_use]
    pub fn msg_type_name(mut self, msg_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.msg_types.register(msg_type, name);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    /// Returns `ConfigError::Missing` if a comp id was not set, or
    /// `ConfigError::InvalidCompId` if one is too long.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let sender: CompId = self
            .sender_comp_id
            .ok_or(ConfigError::Missing("sender_comp_id"))?
            .parse()?;
        let target: CompId = self
            .target_comp_id
            .ok_or(ConfigError::Missing("target_comp_id"))?
            .parse()?;

        let mut settings = Settings::new(sender, target);
        if let Some(begin_string) = self.begin_string {
            settings.begin_string = begin_string;
        }
        settings.msg_types = self.msg_types;
        Ok(settings)
    }
}
