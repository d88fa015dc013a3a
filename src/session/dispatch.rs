//! Command name to handler lookup

use std::collections::HashMap;
use std::io::{BufRead, Write};

use super::handlers;
use super::Outcome;
use crate::error::GameResult;
use crate::game::GameContent;
use crate::protocol::{Channels, Command, InputCursor};

/// One command record: the recognized command plus the stream its arguments
/// are read from, and what a handler may answer with.
pub struct HandlerContext<'a, R, O, D> {
    pub command: Command,
    pub cursor: &'a mut InputCursor<R>,
    pub channels: &'a mut Channels<O, D>,
    pub content: &'a GameContent,
}

/// A command handler
pub type Handler<R, O, D> = fn(&mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome>;

/// Table from exact wire name to handler
pub struct CommandTable<R, O, D> {
    handlers: HashMap<&'static str, (Command, Handler<R, O, D>)>,
}

impl<R: BufRead, O: Write, D: Write> CommandTable<R, O, D> {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Every command wired to its stock handler. `build_level` and
    /// `get_level_count` are recognized but answer as unsupported.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for command in Command::ALL {
            let handler: Handler<R, O, D> = match command {
                Command::BuildMenu => handlers::build_menu,
                Command::BuildLevel | Command::GetLevelCount => handlers::unsupported,
                Command::BuildRoom => handlers::build_room,
                Command::FillObjects => handlers::fill_objects,
                Command::SetBackground => handlers::set_background,
                Command::UpdateAxis => handlers::update_axis,
                Command::UpdateButton => handlers::update_button,
                Command::Exit => handlers::exit,
            };
            table.register(command, handler);
        }
        table
    }

    /// Install a handler, returning the one it replaces
    pub fn register(&mut self, command: Command, handler: Handler<R, O, D>) -> Option<Handler<R, O, D>> {
        self.handlers
            .insert(command.name(), (command, handler))
            .map(|(_, previous)| previous)
    }

    pub fn lookup(&self, line: &str) -> Option<(Command, Handler<R, O, D>)> {
        self.handlers.get(line).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<R: BufRead, O: Write, D: Write> Default for CommandTable<R, O, D> {
    fn default() -> Self {
        Self::standard()
    }
}
