//! Serial output abstractions
//!
//! Provides the byte sink and port selector that the notifier writes
//! through. Both are synchronous: the notifier runs from the firmware's
//! cooperative idle loop and never awaits.

/// Logical serial output port
///
/// Mirrors the firmware's notion of "which port does `SERIAL_ECHO` go to".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialPort {
    /// Primary host port (USB / OctoPrint)
    #[default]
    Host,
    /// Port wired to the touch display
    Display,
    /// Mirror output to host and display
    Both,
}

impl SerialPort {
    /// Returns true if output on this port reaches the display
    pub fn reaches_display(self) -> bool {
        matches!(self, SerialPort::Display | SerialPort::Both)
    }

    /// Returns true if output on this port reaches the host
    pub fn reaches_host(self) -> bool {
        matches!(self, SerialPort::Host | SerialPort::Both)
    }
}

/// Serial transmitter
///
/// Bytes are written as-is; line termination is the caller's concern.
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the port
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Active output port selection
pub trait PortSelect {
    /// Currently selected output port
    fn active_port(&self) -> SerialPort;

    /// Select the port subsequent writes target
    fn select_port(&mut self, port: SerialPort);
}

/// Combined serial interface
///
/// A transmitter whose destination follows the selected port.
pub trait SerialBus: SerialTx + PortSelect {}

// Blanket implementation
impl<T: SerialTx + PortSelect> SerialBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_reach() {
        assert!(SerialPort::Host.reaches_host());
        assert!(!SerialPort::Host.reaches_display());
        assert!(SerialPort::Display.reaches_display());
        assert!(!SerialPort::Display.reaches_host());
        assert!(SerialPort::Both.reaches_host());
        assert!(SerialPort::Both.reaches_display());
    }

    #[test]
    fn test_default_port_is_host() {
        assert_eq!(SerialPort::default(), SerialPort::Host);
    }
}
