//! Adapters from `embedded-io` writers to the serial traits
//!
//! Chip HALs (embassy UARTs, USB CDC) expose `embedded_io::Write`.
//! [`IoSerial`] wraps one of those as a [`SerialTx`], and [`DualPort`]
//! puts a host and a display transmitter behind a single [`PortSelect`].

use crate::serial::{PortSelect, SerialPort, SerialTx};

/// [`SerialTx`] over any blocking `embedded-io` writer
#[derive(Debug)]
pub struct IoSerial<W> {
    inner: W,
}

impl<W: embedded_io::Write> IoSerial<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped writer
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Release the wrapped writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: embedded_io::Write> SerialTx for IoSerial<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

/// Error from a [`DualPort`] write, tagged with the port that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError<HE, DE> {
    /// Host port failed
    Host(HE),
    /// Display port failed
    Display(DE),
}

/// Host and display transmitters behind one port selector
///
/// Writes go to whichever port is selected. Selecting
/// [`SerialPort::Both`] mirrors every write to both transmitters.
#[derive(Debug)]
pub struct DualPort<H, D> {
    host: H,
    display: D,
    active: SerialPort,
}

impl<H: SerialTx, D: SerialTx> DualPort<H, D> {
    /// Create a router with the host port selected
    pub fn new(host: H, display: D) -> Self {
        Self {
            host,
            display,
            active: SerialPort::Host,
        }
    }

    /// Borrow the host transmitter
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Borrow the display transmitter
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Release both transmitters
    pub fn split(self) -> (H, D) {
        (self.host, self.display)
    }
}

impl<H: SerialTx, D: SerialTx> SerialTx for DualPort<H, D> {
    type Error = PortError<H::Error, D::Error>;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        // Both ports are attempted even if the first one fails
        let host = if self.active.reaches_host() {
            self.host.write_blocking(data).map_err(PortError::Host)
        } else {
            Ok(())
        };
        let display = if self.active.reaches_display() {
            self.display.write_blocking(data).map_err(PortError::Display)
        } else {
            Ok(())
        };
        host.and(display)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let host = if self.active.reaches_host() {
            self.host.flush().map_err(PortError::Host)
        } else {
            Ok(())
        };
        let display = if self.active.reaches_display() {
            self.display.flush().map_err(PortError::Display)
        } else {
            Ok(())
        };
        host.and(display)
    }
}

impl<H, D> PortSelect for DualPort<H, D> {
    fn active_port(&self) -> SerialPort {
        self.active
    }

    fn select_port(&mut self, port: SerialPort) {
        self.active = port;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Writer that records everything it receives
    #[derive(Default)]
    struct Sink {
        data: Vec<u8, 64>,
        fail: bool,
    }

    impl embedded_io::ErrorType for Sink {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            if self.fail {
                return Err(embedded_io::ErrorKind::BrokenPipe);
            }
            self.data
                .extend_from_slice(buf)
                .map_err(|_| embedded_io::ErrorKind::OutOfMemory)?;
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn failing() -> Sink {
        Sink {
            fail: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_io_serial_writes_all() {
        let mut serial = IoSerial::new(Sink::default());
        serial.write_blocking(b"//action:start\n").unwrap();
        assert_eq!(&serial.inner().data[..], b"//action:start\n");
    }

    #[test]
    fn test_dual_port_routes_to_selected() {
        let mut ports = DualPort::new(IoSerial::new(Sink::default()), IoSerial::new(Sink::default()));
        ports.write_blocking(b"host").unwrap();
        ports.select_port(SerialPort::Display);
        ports.write_blocking(b"tft").unwrap();

        assert_eq!(&ports.host().inner().data[..], b"host");
        assert_eq!(&ports.display().inner().data[..], b"tft");
    }

    #[test]
    fn test_dual_port_both_mirrors() {
        let mut ports = DualPort::new(IoSerial::new(Sink::default()), IoSerial::new(Sink::default()));
        ports.select_port(SerialPort::Both);
        ports.write_blocking(b"ok").unwrap();

        let (host, display) = ports.split();
        assert_eq!(&host.into_inner().data[..], b"ok");
        assert_eq!(&display.into_inner().data[..], b"ok");
    }

    #[test]
    fn test_dual_port_both_reports_host_error_but_still_writes_display() {
        let mut ports = DualPort::new(IoSerial::new(failing()), IoSerial::new(Sink::default()));
        ports.select_port(SerialPort::Both);

        let result = ports.write_blocking(b"x");
        assert_eq!(result, Err(PortError::Host(embedded_io::ErrorKind::BrokenPipe)));
        assert_eq!(&ports.display().inner().data[..], b"x");
    }

    #[test]
    fn test_dual_port_display_error() {
        let mut ports = DualPort::new(IoSerial::new(Sink::default()), IoSerial::new(failing()));
        ports.select_port(SerialPort::Display);

        let result = ports.write_blocking(b"x");
        assert_eq!(result, Err(PortError::Display(embedded_io::ErrorKind::BrokenPipe)));
        assert!(ports.host().inner().data.is_empty());
    }
}
