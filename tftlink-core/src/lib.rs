//! Firmware-to-display notification shim
//!
//! Translates printer firmware lifecycle callbacks into action commands
//! written to the serial touch display:
//!
//! - Typed firmware events ([`Event`])
//! - Action-command notifier with its progress throttle ([`ActionNotifier`])
//! - Scoped output-port redirection ([`PortRedirect`])
//! - Firmware query and settings extension traits
//! - Notifier configuration
//!
//! Everything runs synchronously from the firmware's cooperative main
//! loop. Nothing here allocates, blocks beyond the serial write, or
//! reports errors back to the firmware.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod event;
pub mod notifier;
pub mod redirect;
pub mod throttle;
pub mod traits;

pub use config::{ConfigError, NotifierConfig, PromptRoute, StatusMessages};
pub use event::Event;
pub use notifier::ActionNotifier;
pub use redirect::PortRedirect;
pub use throttle::ProgressThrottle;
pub use traits::{NoSettings, PrintStatus, SettingsExtension, EEPROM_DATA_SIZE};
