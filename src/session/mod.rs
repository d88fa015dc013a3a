//! The command loop
//!
//! A session reads one command line at a time from the engine, dispatches it
//! through a [`CommandTable`] and keeps going until a handler stops it, an
//! unsupported command is met under the stop policy, or the input ends.

pub mod dispatch;
pub mod handlers;

pub use dispatch::{CommandTable, Handler, HandlerContext};

use std::io::{BufRead, Write};
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::config::{HeraldConfig, MalformedInputPolicy, SessionConfig, UnknownCommandPolicy};
use crate::error::{GameProtocolError, GameResult};
use crate::game::GameContent;
use crate::protocol::{Channels, InputCursor};

/// Result of a single iteration of the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Stop,
    /// The line was not a command this game answers; carries the line
    UnknownCommand(String),
}

/// Why a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Exit,
    EndOfInput,
    UnknownCommand(String),
    MalformedInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: String,
    pub commands_handled: usize,
    pub lines_read: usize,
    pub stop_reason: StopReason,
}

/// A game session bound to one input stream and two output channels
pub struct Session<R, O, D> {
    cursor: InputCursor<R>,
    channels: Channels<O, D>,
    table: CommandTable<R, O, D>,
    content: GameContent,
    config: SessionConfig,
    session_id: String,
    commands_handled: usize,
}

impl<R: BufRead, O: Write, D: Write> Session<R, O, D> {
    /// Create a session serving the content described by `config`
    pub fn new(reader: R, response: O, diagnostic: D, config: &HeraldConfig) -> GameResult<Self> {
        config.validate()?;
        let content = config.content()?;
        Ok(Self::with_content(reader, response, diagnostic, content, config.session))
    }

    pub fn with_content(reader: R, response: O, diagnostic: D, content: GameContent, config: SessionConfig) -> Self {
        Self {
            cursor: InputCursor::new(reader),
            channels: Channels::new(response, diagnostic),
            table: CommandTable::standard(),
            content,
            config,
            session_id: Uuid::new_v4().to_string(),
            commands_handled: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn table_mut(&mut self) -> &mut CommandTable<R, O, D> {
        &mut self.table
    }

    /// Read and handle exactly one command line.
    ///
    /// Returns [`GameProtocolError::EndOfInput`] when no line is left, and the
    /// handler's error when its arguments are malformed. A diagnostic line is
    /// written for unknown commands and malformed arguments.
    pub fn run_iteration(&mut self) -> GameResult<Outcome> {
        let line = self.cursor.read_line()?;

        let Some((command, handler)) = self.table.lookup(&line) else {
            debug!(line = %line, "unknown command");
            self.channels.diagnose(&format!("Unknown command '{}'", line))?;
            return Ok(Outcome::UnknownCommand(line));
        };

        debug!(command = %command, line = self.cursor.lines_read(), "dispatching");

        let mut ctx = HandlerContext {
            command,
            cursor: &mut self.cursor,
            channels: &mut self.channels,
            content: &self.content,
        };

        match handler(&mut ctx) {
            Ok(outcome) => {
                self.commands_handled += 1;
                Ok(outcome)
            }
            Err(err) if err.is_malformed_input() => {
                debug!(command = %command, error = %err, "malformed arguments");
                self.channels
                    .diagnose(&format!("Bad arguments for '{}': {}", command, err))?;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Run the loop to completion.
    ///
    /// End of input, `exit`, and the configured unknown/malformed policies all
    /// end the session normally. Only stream failures are returned as errors.
    pub fn run(&mut self) -> GameResult<SessionSummary> {
        let span = info_span!("session", session_id = %self.session_id);
        let _guard = span.enter();

        info!(
            unknown_command = ?self.config.unknown_command,
            malformed_input = ?self.config.malformed_input,
            "session started"
        );

        let stop_reason = loop {
            match self.run_iteration() {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Stop) => break StopReason::Exit,
                Ok(Outcome::UnknownCommand(line)) => match self.config.unknown_command {
                    UnknownCommandPolicy::Stop => break StopReason::UnknownCommand(line),
                    UnknownCommandPolicy::Continue => {}
                },
                Err(GameProtocolError::EndOfInput) => break StopReason::EndOfInput,
                Err(err) if err.is_malformed_input() => match self.config.malformed_input {
                    MalformedInputPolicy::Stop => break StopReason::MalformedInput(err.to_string()),
                    MalformedInputPolicy::Skip => {}
                },
                Err(err) => return Err(err),
            }
        };

        let summary = SessionSummary {
            session_id: self.session_id.clone(),
            commands_handled: self.commands_handled,
            lines_read: self.cursor.lines_read(),
            stop_reason,
        };

        info!(
            commands_handled = summary.commands_handled,
            lines_read = summary.lines_read,
            stop_reason = ?summary.stop_reason,
            "session stopped"
        );

        Ok(summary)
    }

    /// Consume the session, handing back the response and diagnostic sinks
    pub fn into_channels(self) -> (O, D) {
        self.channels.into_inner()
    }
}
