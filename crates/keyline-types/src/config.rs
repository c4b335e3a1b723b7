//! Command-layer configuration.
//!
//! Every field has a default, so an empty TOML document yields the stock
//! behaviour: `.` opens long-command entry and the fixed-command preview is
//! 32 columns wide.

use std::path::Path;

use serde::Deserialize;

use crate::error::{KeylineError, Result};

/// Tunables for the dispatcher, line editor, and help listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeylineConfig {
    /// Key that starts long-command entry.
    pub long_prefix: char,
    /// Width of the fixed-command input preview.
    pub preview_width: usize,
    /// Minimum width of the key/name column in the help listing.
    pub help_width: usize,
    /// Initial capacity of a session's input buffer.
    pub buffer_capacity: usize,
    /// Prompt printed when long-command entry starts.
    pub long_prompt: String,
    /// Notice printed when a session is cancelled with Escape.
    pub cancel_text: String,
}

impl Default for KeylineConfig {
    fn default() -> Self {
        Self {
            long_prefix: '.',
            preview_width: 32,
            help_width: 5,
            buffer_capacity: 32,
            long_prompt: "Please enter long command:".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

impl KeylineConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The long-command prefix as a key code.
    ///
    /// Only single-byte prefixes are accepted by [`KeylineConfig::validate`].
    pub fn long_prefix_key(&self) -> u8 {
        u8::try_from(u32::from(self.long_prefix)).unwrap_or(b'.')
    }

    /// Reject settings the dispatcher cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !self.long_prefix.is_ascii() || self.long_prefix.is_ascii_control() {
            return Err(KeylineError::InvalidArgument(format!(
                "long_prefix must be a printable ASCII character, got {:?}",
                self.long_prefix
            )));
        }
        if self.preview_width == 0 {
            return Err(KeylineError::InvalidArgument(
                "preview_width must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
