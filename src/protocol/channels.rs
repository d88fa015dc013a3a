//! Response and diagnostic output channels

use std::io::Write;

use crate::error::{GameProtocolError, GameResult};

/// The two output streams of the game process.
///
/// Every write is flushed immediately; ordering holds within a channel but not
/// across them.
#[derive(Debug)]
pub struct Channels<O, D> {
    response: O,
    diagnostic: D,
}

impl<O: Write, D: Write> Channels<O, D> {
    pub fn new(response: O, diagnostic: D) -> Self {
        Self { response, diagnostic }
    }

    /// Write one line of protocol data for the engine
    pub fn respond(&mut self, line: &str) -> GameResult<()> {
        writeln!(self.response, "{}", line)
            .and_then(|_| self.response.flush())
            .map_err(|e| GameProtocolError::io("response", e))
    }

    /// Write one human-readable status line
    pub fn diagnose(&mut self, message: &str) -> GameResult<()> {
        writeln!(self.diagnostic, "{}", message)
            .and_then(|_| self.diagnostic.flush())
            .map_err(|e| GameProtocolError::io("diagnostic", e))
    }

    pub fn into_inner(self) -> (O, D) {
        (self.response, self.diagnostic)
    }
}
