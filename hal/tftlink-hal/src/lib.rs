//! tftlink Hardware Abstraction Layer
//!
//! Serial transport traits used by the action-command notifier. The
//! firmware owns the physical UARTs; this crate only describes how bytes
//! reach them and which logical port is currently selected.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tftlink-core (ActionNotifier)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tftlink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  host serial  │       │  TFT serial   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialTx`] - Blocking byte output
//! - [`serial::PortSelect`] - Active output port selection
//!
//! [`io::IoSerial`] adapts any `embedded-io` writer, and [`io::DualPort`]
//! routes a host and a display port behind one selector.

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use io::{DualPort, IoSerial, PortError};
pub use serial::{PortSelect, SerialBus, SerialPort, SerialTx};
