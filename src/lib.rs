//! Herald game - a demo game process for the Herald engine protocol
//!
//! The engine launches the game as a child process and talks to it over stdio:
//! - commands arrive one per line on standard input
//! - protocol responses (menu scripts, room layouts, backgrounds) go to standard output
//! - human-readable diagnostics go to standard error
//!
//! The [`Session`] drives the read-dispatch-respond loop; [`HeraldConfig`]
//! decides what content it answers with and how it treats bad input.

pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod session;

// Re-export commonly used types for convenience
pub use error::{GameProtocolError, GameResult};

pub use config::{HeraldConfig, MalformedInputPolicy, SessionConfig, UnknownCommandPolicy};

pub use game::{Background, GameContent, MenuScript, ObjectMap, RoomLayout};

pub use protocol::{AxisUpdate, Button, ButtonUpdate, Command, InputCursor};

pub use session::{CommandTable, Outcome, Session, SessionSummary, StopReason};
