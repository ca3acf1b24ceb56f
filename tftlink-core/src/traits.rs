//! Firmware collaborator traits
//!
//! The notifier only queries the firmware; print state and persistence
//! stay owned by the firmware and are reached through these traits.

/// Bytes of the settings block reserved for the display extension
pub const EEPROM_DATA_SIZE: usize = 48;

/// Read-only print job state
pub trait PrintStatus {
    /// Returns true while a print job is running
    fn is_printing(&self) -> bool;

    /// Print time elapsed in seconds
    fn elapsed_seconds(&self) -> u32;

    /// Job completion (0-100)
    fn progress_percent(&self) -> u8;
}

/// Extension point for data persisted alongside firmware settings
///
/// Buffers passed in are at most [`EEPROM_DATA_SIZE`] bytes. All methods
/// default to doing nothing, so no payload is stored unless an
/// implementation opts in.
pub trait SettingsExtension {
    /// Settings are being saved; write up to `buffer.len()` bytes
    fn store(&mut self, buffer: &mut [u8]) {
        let _ = buffer;
    }

    /// Settings are being loaded; read up to `buffer.len()` bytes
    fn load(&mut self, buffer: &[u8]) {
        let _ = buffer;
    }

    /// The whole settings store has been written
    fn store_written(&mut self, success: bool) {
        let _ = success;
    }

    /// The whole settings store has been read
    fn store_read(&mut self, success: bool) {
        let _ = success;
    }
}

/// Settings extension that persists nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsExtension for NoSettings {}
