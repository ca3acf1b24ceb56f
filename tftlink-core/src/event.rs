//! Firmware lifecycle events delivered to the notifier

/// Events raised by the firmware's extensible-UI hooks
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event<'a> {
    // Lifecycle events
    /// Firmware finished booting
    Startup,
    /// Main loop idle tick
    Idle,
    /// Printer halted by a fatal error
    PrinterKilled(&'a str),

    // Media events
    /// Card inserted
    MediaInserted,
    /// Card could not be read
    MediaError,
    /// Card removed
    MediaRemoved,

    // Print job events
    /// Print timer started
    PrintTimerStarted,
    /// Print timer paused
    PrintTimerPaused,
    /// Print timer stopped
    PrintTimerStopped,
    /// Filament ran out on an extruder
    FilamentRunout { extruder: u8 },
    /// Firmware is waiting for the user
    UserConfirmRequired(&'a str),

    // UI events
    /// Beeper request
    PlayTone { frequency_hz: u16, duration_ms: u16 },
    /// Status line text changed
    StatusChanged(&'a str),

    // Settings events
    /// Settings reset to factory defaults
    FactoryReset,
    /// Settings are being saved; extension data goes into the buffer
    StoreSettings(&'a mut [u8]),
    /// Settings are being loaded; extension data comes from the buffer
    LoadSettings(&'a [u8]),
    /// Settings store fully written
    ConfigurationStoreWritten(bool),
    /// Settings store fully read
    ConfigurationStoreRead(bool),
}

impl Event<'_> {
    /// Check if this event comes from the settings store
    ///
    /// Settings events still reach the extension after the printer is killed.
    pub fn is_settings_event(&self) -> bool {
        matches!(
            self,
            Event::FactoryReset
                | Event::StoreSettings(_)
                | Event::LoadSettings(_)
                | Event::ConfigurationStoreWritten(_)
                | Event::ConfigurationStoreRead(_)
        )
    }
}
