//! Action-command notifier
//!
//! Receives firmware lifecycle callbacks and writes the matching action
//! commands to the display port. Every emission is wrapped in a
//! [`PortRedirect`] to [`SerialPort::Display`], so output from other
//! subsystems keeps going wherever it went before.
//!
//! | Hook | Emits |
//! |------|-------|
//! | startup | `connect <firmware> <version>` |
//! | idle | `progress S<secs> P<percent>`, at most once per interval |
//! | printer killed | prompt dialog with the message, then `kill` |
//! | media | `media insert` / `media error` / `media removed` |
//! | tone | `bell F<freq> D<dur>` |
//! | print timer | `start` + `progress`, `paused`, `cancel` |
//! | status / reset / settings | `status <text>` |
//!
//! Nothing is reported back to the firmware. Over-long text is truncated
//! and transport errors are dropped.

use core::slice;

use tftlink_hal::{SerialBus, SerialPort};
use tftlink_protocol::{ActionCommand, ActionLine, MediaEvent, MAX_LINE_SIZE};

use crate::config::{NotifierConfig, StatusMessages};
use crate::event::Event;
use crate::redirect::PortRedirect;
use crate::throttle::ProgressThrottle;
use crate::traits::{NoSettings, PrintStatus, SettingsExtension, EEPROM_DATA_SIZE};

/// Translates firmware events into action commands on the display port
pub struct ActionNotifier<B, P, X = NoSettings> {
    /// Serial output with port selection
    bus: B,
    /// Firmware print state
    status: P,
    /// Settings block extension
    settings: X,
    /// Configuration
    config: NotifierConfig,
    /// Idle progress rate limiter
    throttle: ProgressThrottle,
    /// Set once the printer has been killed
    killed: bool,
}

impl<B: SerialBus, P: PrintStatus> ActionNotifier<B, P, NoSettings> {
    /// Create a notifier without a settings extension
    pub fn new(bus: B, status: P, config: NotifierConfig) -> Self {
        Self::with_settings(bus, status, NoSettings, config)
    }
}

impl<B: SerialBus, P: PrintStatus, X: SettingsExtension> ActionNotifier<B, P, X> {
    /// Create a notifier with a settings extension
    pub fn with_settings(bus: B, status: P, settings: X, config: NotifierConfig) -> Self {
        let throttle = ProgressThrottle::new(config.progress_interval_ms);
        Self {
            bus,
            status,
            settings,
            config,
            throttle,
            killed: false,
        }
    }

    /// Get the serial bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Get the serial bus mutably
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Get the print status source
    pub fn status(&self) -> &P {
        &self.status
    }

    /// Get the print status source mutably
    pub fn status_mut(&mut self) -> &mut P {
        &mut self.status
    }

    /// Get the settings extension
    pub fn settings(&self) -> &X {
        &self.settings
    }

    /// Get the configuration
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Get the progress throttle
    pub fn throttle(&self) -> &ProgressThrottle {
        &self.throttle
    }

    /// Returns true once the printer has been killed
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Release the bus, status source and settings extension
    pub fn into_parts(self) -> (B, P, X) {
        (self.bus, self.status, self.settings)
    }

    /// Write one action command to the display
    pub fn emit(&mut self, cmd: &ActionCommand<'_>) {
        self.emit_all(slice::from_ref(cmd));
    }

    /// Write several action commands under a single redirect
    pub fn emit_all(&mut self, cmds: &[ActionCommand<'_>]) {
        send(&mut self.bus, self.killed, cmds);
    }

    /// Write one of the configured status messages
    fn emit_status(&mut self, pick: fn(&StatusMessages) -> &str) {
        let status = ActionCommand::Status(pick(&self.config.messages));
        send(&mut self.bus, self.killed, &[status]);
    }

    /// Dispatch a firmware event to its hook
    ///
    /// `now_ms` is the firmware millisecond counter; only idle and status
    /// events use it. Once the printer is killed only settings events are
    /// dispatched.
    pub fn handle(&mut self, event: Event<'_>, now_ms: u32) {
        if self.killed && !event.is_settings_event() {
            #[cfg(feature = "defmt")]
            defmt::trace!("Printer killed, ignoring {}", event);
            return;
        }

        match event {
            Event::Startup => self.on_startup(),
            Event::Idle => self.on_idle(now_ms),
            Event::PrinterKilled(msg) => self.on_printer_killed(msg),
            Event::MediaInserted => self.on_media_inserted(),
            Event::MediaError => self.on_media_error(),
            Event::MediaRemoved => self.on_media_removed(),
            Event::PrintTimerStarted => self.on_print_timer_started(),
            Event::PrintTimerPaused => self.on_print_timer_paused(),
            Event::PrintTimerStopped => self.on_print_timer_stopped(),
            Event::FilamentRunout { extruder } => self.on_filament_runout(extruder),
            Event::UserConfirmRequired(msg) => self.on_user_confirm_required(msg),
            Event::PlayTone {
                frequency_hz,
                duration_ms,
            } => self.on_play_tone(frequency_hz, duration_ms),
            Event::StatusChanged(msg) => self.on_status_changed(msg, now_ms),
            Event::FactoryReset => self.on_factory_reset(),
            Event::StoreSettings(buffer) => self.on_store_settings(buffer),
            Event::LoadSettings(buffer) => self.on_load_settings(buffer),
            Event::ConfigurationStoreWritten(success) => {
                self.on_configuration_store_written(success)
            }
            Event::ConfigurationStoreRead(success) => self.on_configuration_store_read(success),
        }
    }

    /// Announce the firmware to the display
    pub fn on_startup(&mut self) {
        let connect = ActionCommand::Connect {
            firmware: self.config.firmware_name.as_str(),
            version: self.config.version.as_str(),
        };
        send(&mut self.bus, self.killed, &[connect]);
    }

    /// Idle tick: report progress if a print is running and the throttle allows
    pub fn on_idle(&mut self, now_ms: u32) {
        if !self.config.idle_progress || !self.status.is_printing() {
            return;
        }

        let seconds = self.status.elapsed_seconds();
        if seconds <= self.config.min_elapsed_s || !self.throttle.is_ready(now_ms) {
            return;
        }

        let percent = self.status.progress_percent();
        self.emit(&ActionCommand::Progress { seconds, percent });
        self.throttle.mark_sent(now_ms);
    }

    /// Fatal halt: show the message as a prompt, then send `kill`
    ///
    /// Nothing is emitted after this.
    pub fn on_printer_killed(&mut self, msg: &str) {
        self.emit_all(&[
            ActionCommand::PromptEnd,
            ActionCommand::PromptBegin(msg),
            ActionCommand::PromptShow,
            ActionCommand::Kill,
        ]);
        if !self.killed {
            #[cfg(feature = "defmt")]
            defmt::info!("Printer killed: {}", msg);
            self.killed = true;
        }
    }

    /// Card inserted
    pub fn on_media_inserted(&mut self) {
        self.emit(&ActionCommand::Media(MediaEvent::Inserted));
    }

    /// Card read error
    pub fn on_media_error(&mut self) {
        self.emit(&ActionCommand::Media(MediaEvent::Error));
    }

    /// Card removed
    pub fn on_media_removed(&mut self) {
        self.emit(&ActionCommand::Media(MediaEvent::Removed));
    }

    /// Beeper request
    pub fn on_play_tone(&mut self, frequency_hz: u16, duration_ms: u16) {
        self.emit(&ActionCommand::Bell {
            frequency_hz,
            duration_ms,
        });
    }

    /// Print started: send `start` and an immediate progress report
    ///
    /// Also re-arms the idle throttle so the first idle tick past the
    /// minimum elapsed time reports again. That tick can repeat the progress
    /// sent here, since the throttle starts empty.
    pub fn on_print_timer_started(&mut self) {
        let progress = ActionCommand::Progress {
            seconds: self.status.elapsed_seconds(),
            percent: self.status.progress_percent(),
        };
        self.emit_all(&[ActionCommand::Start, progress]);
        self.throttle.reset();
    }

    /// Print paused
    pub fn on_print_timer_paused(&mut self) {
        self.emit(&ActionCommand::Paused);
    }

    /// Print stopped
    pub fn on_print_timer_stopped(&mut self) {
        self.emit(&ActionCommand::Cancel);
    }

    /// Filament runout: route the firmware's host prompt to the display
    pub fn on_filament_runout(&mut self, extruder: u8) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Filament runout on E{}", extruder);
        #[cfg(not(feature = "defmt"))]
        let _ = extruder;
        self.route_prompts();
    }

    /// User confirmation: route the firmware's host prompt to the display
    pub fn on_user_confirm_required(&mut self, msg: &str) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Confirmation required: {}", msg);
        #[cfg(not(feature = "defmt"))]
        let _ = msg;
        self.route_prompts();
    }

    /// Status text changed; an idle tick runs first
    pub fn on_status_changed(&mut self, msg: &str, now_ms: u32) {
        self.on_idle(now_ms);
        self.emit(&ActionCommand::Status(msg));
    }

    /// Factory reset
    pub fn on_factory_reset(&mut self) {
        self.emit_status(|messages| messages.service_reset.as_str());
    }

    /// Settings are being saved
    ///
    /// The extension sees at most [`EEPROM_DATA_SIZE`] bytes of `buffer`.
    pub fn on_store_settings(&mut self, buffer: &mut [u8]) {
        let len = buffer.len().min(EEPROM_DATA_SIZE);
        self.settings.store(&mut buffer[..len]);
        self.emit_status(|messages| messages.store_settings.as_str());
    }

    /// Settings are being loaded
    ///
    /// The extension sees at most [`EEPROM_DATA_SIZE`] bytes of `buffer`.
    pub fn on_load_settings(&mut self, buffer: &[u8]) {
        let len = buffer.len().min(EEPROM_DATA_SIZE);
        self.settings.load(&buffer[..len]);
        self.emit_status(|messages| messages.load_settings.as_str());
    }

    /// Settings store fully written
    pub fn on_configuration_store_written(&mut self, success: bool) {
        #[cfg(feature = "defmt")]
        if !success {
            defmt::warn!("Settings store write failed");
        }
        self.settings.store_written(success);
    }

    /// Settings store fully read
    pub fn on_configuration_store_read(&mut self, success: bool) {
        #[cfg(feature = "defmt")]
        if !success {
            defmt::warn!("Settings store read failed");
        }
        self.settings.store_read(success);
    }

    /// Leave the bus on the configured prompt route
    fn route_prompts(&mut self) {
        if self.killed {
            return;
        }
        PortRedirect::new(&mut self.bus, self.config.prompt_route.port()).keep();
    }
}

/// Render and write commands to the display port
///
/// Drops everything once the printer has been killed.
fn send<B: SerialBus>(bus: &mut B, killed: bool, cmds: &[ActionCommand<'_>]) {
    if killed {
        #[cfg(feature = "defmt")]
        defmt::trace!("Printer killed, dropping {} action(s)", cmds.len());
        return;
    }

    let mut port = PortRedirect::new(bus, SerialPort::Display);
    let mut buffer = [0u8; MAX_LINE_SIZE];

    for cmd in cmds {
        let line = ActionLine::render(cmd);

        // Cannot fail: the buffer holds the longest possible line
        let Ok(len) = line.encode(&mut buffer) else {
            continue;
        };
        let _sent = port.write_blocking(&buffer[..len]);

        #[cfg(feature = "defmt")]
        {
            if line.is_truncated() {
                defmt::warn!("Action truncated: {}", line);
            }
            match _sent {
                Ok(()) => defmt::trace!("Action sent: {}", line),
                Err(_) => defmt::warn!("Failed to send action: {}", line),
            }
        }
    }

    let _flushed = port.flush();
    #[cfg(feature = "defmt")]
    if _flushed.is_err() {
        defmt::warn!("Failed to flush display port");
    }
}
