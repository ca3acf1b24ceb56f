//! Scoped output-port redirection

use core::ops::{Deref, DerefMut};

use tftlink_hal::{PortSelect, SerialPort};

/// Guard that selects a serial port and restores the previous one on drop
///
/// Writes made through the guard (it derefs to the bus) land on the
/// redirected port. The previous port comes back on every exit path.
pub struct PortRedirect<'a, B: PortSelect> {
    bus: &'a mut B,
    previous: SerialPort,
    restore: bool,
}

impl<'a, B: PortSelect> PortRedirect<'a, B> {
    /// Select `port`, remembering the currently active one
    pub fn new(bus: &'a mut B, port: SerialPort) -> Self {
        let previous = bus.active_port();
        bus.select_port(port);
        Self {
            bus,
            previous,
            restore: true,
        }
    }

    /// Port that will be restored
    pub fn previous(&self) -> SerialPort {
        self.previous
    }

    /// Leave the redirected port selected after the guard goes away
    pub fn keep(mut self) {
        self.restore = false;
    }
}

impl<B: PortSelect> Deref for PortRedirect<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.bus
    }
}

impl<B: PortSelect> DerefMut for PortRedirect<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.bus
    }
}

impl<B: PortSelect> Drop for PortRedirect<'_, B> {
    fn drop(&mut self) {
        if self.restore {
            self.bus.select_port(self.previous);
        }
    }
}
