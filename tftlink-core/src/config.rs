//! Notifier configuration
//!
//! Defaults reproduce the stock behaviour of the display adapter: 50 s
//! between idle progress reports, prompts mirrored to host and display,
//! and the English status strings for settings operations.

use heapless::String;
use tftlink_hal::SerialPort;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum firmware name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum version string length
pub const MAX_VERSION_LEN: usize = 24;

/// Maximum status message length
pub const MAX_MESSAGE_LEN: usize = 32;

/// Minimum time between idle progress reports
pub const DEFAULT_PROGRESS_INTERVAL_MS: u32 = 50_000;

/// Print time that must pass before idle progress is reported
pub const DEFAULT_MIN_ELAPSED_S: u32 = 1;

/// Errors from configuration loading or validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Configuration text could not be parsed
    Parse,
    /// Progress interval must be non-zero
    InvalidInterval,
    /// Firmware name must not be empty
    EmptyFirmwareName,
}

/// Where host prompt dialogs go after a runout or confirmation hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PromptRoute {
    /// Only the display answers prompts
    DisplayOnly,
    /// Host and display both see the prompt
    #[default]
    Both,
}

impl PromptRoute {
    /// Serial port that prompt output should target
    pub fn port(self) -> SerialPort {
        match self {
            PromptRoute::DisplayOnly => SerialPort::Display,
            PromptRoute::Both => SerialPort::Both,
        }
    }
}

/// Status text sent for settings and service operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusMessages {
    /// Sent on factory reset
    pub service_reset: String<MAX_MESSAGE_LEN>,
    /// Sent when settings are stored
    pub store_settings: String<MAX_MESSAGE_LEN>,
    /// Sent when settings are loaded
    pub load_settings: String<MAX_MESSAGE_LEN>,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            service_reset: label("Reset"),
            store_settings: label("Store Settings"),
            load_settings: label("Load Settings"),
        }
    }
}

/// Action notifier configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NotifierConfig {
    /// Firmware name announced on connect
    pub firmware_name: String<MAX_NAME_LEN>,
    /// Short build version announced on connect
    pub version: String<MAX_VERSION_LEN>,
    /// Minimum time between idle progress reports (ms)
    pub progress_interval_ms: u32,
    /// Print time that must be exceeded before idle progress (s)
    pub min_elapsed_s: u32,
    /// Report progress from the idle loop
    pub idle_progress: bool,
    /// Prompt routing after runout / confirmation hooks
    pub prompt_route: PromptRoute,
    /// Status strings
    pub messages: StatusMessages,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            firmware_name: label("Marlin"),
            version: label("2.0.x"),
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            min_elapsed_s: DEFAULT_MIN_ELAPSED_S,
            idle_progress: true,
            prompt_route: PromptRoute::Both,
            messages: StatusMessages::default(),
        }
    }
}

impl NotifierConfig {
    /// Set the announced version, truncating to [`MAX_VERSION_LEN`]
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = label(version);
        self
    }

    /// Check the configuration for values the notifier cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.firmware_name.is_empty() {
            return Err(ConfigError::EmptyFirmwareName);
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML text
    ///
    /// Missing keys take their default values.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

/// Copy `text` into a bounded string, dropping what does not fit
fn label<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
