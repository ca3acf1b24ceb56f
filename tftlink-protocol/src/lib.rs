//! Action-Command Wire Protocol
//!
//! This crate defines the text protocol between the printer firmware and
//! an attached serial touch display. Every message is a single ASCII line
//! in the OctoPrint action-command style:
//!
//! ```text
//! //action:<keyword>[ <args>]\n
//! ```
//!
//! There is no framing, checksum or acknowledgement. The display reads
//! lines, picks out the ones carrying the action prefix and ignores the
//! rest of the serial chatter (`ok`, echo output, temperature reports).
//!
//! Bodies are rendered into a fixed-capacity buffer
//! ([`MAX_COMMAND_LEN`] bytes) and truncated, never overrun.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod action;
pub mod line;

pub use action::{ActionCommand, MediaEvent};
pub use line::{
    ActionLine, LineError, LineParser, ACTION_PREFIX, LINE_TERMINATOR, LONG_FILENAME_LENGTH,
    MAX_COMMAND_LEN, MAX_LINE_SIZE,
};
