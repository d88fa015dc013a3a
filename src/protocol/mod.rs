//! Wire-level pieces of the engine protocol

pub mod channels;
pub mod command;
pub mod controller;
pub mod cursor;

pub use channels::Channels;
pub use command::Command;
pub use controller::{AxisUpdate, Button, ButtonUpdate};
pub use cursor::InputCursor;
