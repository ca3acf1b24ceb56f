//! Line encoding and decoding for action commands
//!
//! Line format:
//! - PREFIX: `//action:`
//! - BODY (0-[`MAX_COMMAND_LEN`] bytes): rendered [`ActionCommand`]
//! - TERMINATOR: `\n`
//!
//! Bodies longer than the buffer are cut at the last whole character that
//! fits. Line breaks inside argument text are replaced by spaces so a
//! status message can never forge a second line.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::action::ActionCommand;

/// Prefix marking a line as an action command
pub const ACTION_PREFIX: &str = "//action:";

/// Line terminator
pub const LINE_TERMINATOR: u8 = b'\n';

/// Room reserved for a long media filename (13-char VFAT entries × 2 + NUL)
#[cfg(feature = "media")]
pub const LONG_FILENAME_LENGTH: usize = 13 * 2 + 1;

/// Room reserved for a long media filename (no media support)
#[cfg(not(feature = "media"))]
pub const LONG_FILENAME_LENGTH: usize = 0;

/// Maximum body size in bytes
pub const MAX_COMMAND_LEN: usize = (32 + LONG_FILENAME_LENGTH) * 2;

/// Maximum complete line size (PREFIX + MAX_COMMAND_LEN + TERMINATOR)
pub const MAX_LINE_SIZE: usize = ACTION_PREFIX.len() + MAX_COMMAND_LEN + 1;

/// Errors that can occur during line encoding or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Incoming line exceeded [`MAX_LINE_SIZE`]
    LineTooLong,
    /// Incoming action line was not valid UTF-8
    InvalidText,
}

/// A rendered, bounded action command body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionLine {
    body: String<MAX_COMMAND_LEN>,
    truncated: bool,
}

/// `fmt::Write` sink that stops at capacity instead of failing
struct Truncating<'a> {
    out: &'a mut String<MAX_COMMAND_LEN>,
    truncated: &'a mut bool,
}

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if *self.truncated {
                break;
            }
            let c = match c {
                '\r' | '\n' => ' ',
                c => c,
            };
            if self.out.push(c).is_err() {
                *self.truncated = true;
            }
        }
        // Never report an error: formatting must always run to completion
        Ok(())
    }
}

impl ActionLine {
    /// Render a command into a new line
    pub fn render(cmd: &ActionCommand<'_>) -> Self {
        let mut line = Self::default();
        {
            let mut sink = Truncating {
                out: &mut line.body,
                truncated: &mut line.truncated,
            };
            let _ = write!(sink, "{}", cmd);
        }
        line
    }

    /// Build a line from raw body text
    pub fn from_body(body: &str) -> Self {
        let mut line = Self::default();
        {
            let mut sink = Truncating {
                out: &mut line.body,
                truncated: &mut line.truncated,
            };
            let _ = sink.write_str(body);
        }
        line
    }

    /// Body text without prefix or terminator
    pub fn as_str(&self) -> &str {
        self.body.as_str()
    }

    /// Body length in bytes
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the body is empty
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns true if the body was cut to fit [`MAX_COMMAND_LEN`]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Leading keyword
    pub fn keyword(&self) -> &str {
        match self.body.split_once(' ') {
            Some((keyword, _)) => keyword,
            None => self.body.as_str(),
        }
    }

    /// Argument text after the keyword, if any
    pub fn args(&self) -> Option<&str> {
        self.body.split_once(' ').map(|(_, args)| args)
    }

    /// Parse the body back into a typed command
    pub fn command(&self) -> Option<ActionCommand<'_>> {
        ActionCommand::parse(self.body.as_str())
    }

    /// Encode the full wire line into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, LineError> {
        let prefix = ACTION_PREFIX.as_bytes();
        let body = self.body.as_bytes();
        let line_len = prefix.len() + body.len() + 1;
        if buffer.len() < line_len {
            return Err(LineError::BufferTooSmall);
        }

        buffer[..prefix.len()].copy_from_slice(prefix);
        buffer[prefix.len()..prefix.len() + body.len()].copy_from_slice(body);
        buffer[line_len - 1] = LINE_TERMINATOR;

        Ok(line_len)
    }

    /// Encode the full wire line into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_LINE_SIZE>, LineError> {
        let mut buffer = [0u8; MAX_LINE_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| LineError::BufferTooSmall)?;
        Ok(vec)
    }
}

impl fmt::Display for ActionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.body.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ActionLine {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.body.as_str());
        if self.truncated {
            defmt::write!(f, " (truncated)");
        }
    }
}

/// Display-side parser for incoming serial lines
///
/// Feeds bytes one at a time and yields every complete `//action:` line.
/// Other lines are skipped. An over-long line is reported once and the
/// parser resynchronises at the next terminator.
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_SIZE>,
    overflowed: bool,
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a complete action line is parsed,
    /// `Ok(None)` when more bytes are needed or a non-action line ended,
    /// or `Err` on a malformed line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<ActionLine>, LineError> {
        if byte != LINE_TERMINATOR {
            if self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return Ok(None);
        }

        if self.overflowed {
            self.reset();
            return Err(LineError::LineTooLong);
        }

        let mut raw: &[u8] = &self.buffer;
        if let Some((&b'\r', rest)) = raw.split_last() {
            raw = rest;
        }

        let result = match raw.strip_prefix(ACTION_PREFIX.as_bytes()) {
            Some(body) => core::str::from_utf8(body)
                .map(|body| Some(ActionLine::from_body(body)))
                .map_err(|_| LineError::InvalidText),
            None => Ok(None),
        };

        self.reset();
        result
    }

    /// Iterate over the action lines found in `bytes`
    ///
    /// Every byte is consumed; a partial trailing line stays buffered for
    /// the next call.
    pub fn lines<'p, 'b>(&'p mut self, bytes: &'b [u8]) -> Lines<'p, 'b> {
        Lines {
            parser: self,
            bytes,
            pos: 0,
        }
    }
}

/// Iterator returned by [`LineParser::lines`]
pub struct Lines<'p, 'b> {
    parser: &'p mut LineParser,
    bytes: &'b [u8],
    pos: usize,
}

impl Iterator for Lines<'_, '_> {
    type Item = Result<ActionLine, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            self.pos += 1;
            match self.parser.feed(byte) {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
