//! Controller axis and button updates

use std::fmt;
use std::io::BufRead;
use tracing::warn;

use super::command::Command;
use super::cursor::{parse_bool, parse_float, parse_int, InputCursor};
use crate::error::GameResult;

/// Buttons the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
}

impl Button {
    /// Engine-side button id. Id 2 is unassigned.
    pub fn id(&self) -> i32 {
        match self {
            Button::A => 0,
            Button::B => 1,
            Button::X => 3,
            Button::Y => 4,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Button::A),
            1 => Some(Button::B),
            3 => Some(Button::X),
            4 => Some(Button::Y),
            _ => None,
        }
    }
}

/// New axis position for a controller. Both values are nominally in `[-1, 1]`,
/// with positive x to the right and positive y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisUpdate {
    pub controller: i32,
    pub x: f64,
    pub y: f64,
}

impl AxisUpdate {
    /// Read `<int controller> <float x> <float y>` from the input.
    ///
    /// All three tokens are consumed before any is parsed, so a bad value
    /// never leaves the rest of the arguments on the input.
    pub fn read_from<R: BufRead>(cursor: &mut InputCursor<R>) -> GameResult<Self> {
        let mut tokens = cursor.next_tokens(Command::UpdateAxis.arity())?.into_iter();
        let mut next = || tokens.next().unwrap_or_default();
        let controller = parse_int(next())?;
        let x = parse_float(next())?;
        let y = parse_float(next())?;

        if !(-1.0..=1.0).contains(&x) || !(-1.0..=1.0).contains(&y) {
            warn!(controller, x, y, "axis value outside [-1, 1]");
        }

        Ok(Self { controller, x, y })
    }

    /// Encode as the engine writes it, one value per line
    pub fn encode(&self) -> String {
        format!(
            "{}{}\n{}\n{}\n",
            Command::UpdateAxis.encode(),
            self.controller,
            self.x,
            self.y
        )
    }
}

impl fmt::Display for AxisUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller {} axis x {} y {}", self.controller, self.x, self.y)
    }
}

/// Change of a button's pressed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonUpdate {
    pub controller: i32,
    pub button: i32,
    pub state: bool,
}

impl ButtonUpdate {
    /// Read `<int controller> <int button> <bool state>` from the input
    pub fn read_from<R: BufRead>(cursor: &mut InputCursor<R>) -> GameResult<Self> {
        let mut tokens = cursor.next_tokens(Command::UpdateButton.arity())?.into_iter();
        let mut next = || tokens.next().unwrap_or_default();
        let controller = parse_int(next())?;
        let button = parse_int(next())?;
        let state = parse_bool(next())?;

        if Button::from_id(button).is_none() {
            warn!(controller, button, "update for unassigned button id");
        }

        Ok(Self {
            controller,
            button,
            state,
        })
    }

    pub fn button(&self) -> Option<Button> {
        Button::from_id(self.button)
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{}\n{}\n{}\n",
            Command::UpdateButton.encode(),
            self.controller,
            self.button,
            self.state
        )
    }
}

impl fmt::Display for ButtonUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.state { "pressed" } else { "released" };
        match self.button() {
            Some(button) => write!(
                f,
                "controller {} button {} ({:?}) {}",
                self.controller, self.button, button, state
            ),
            None => write!(f, "controller {} button {} {}", self.controller, self.button, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_button_ids_skip_two() {
        assert_eq!(Button::X.id(), 3);
        assert_eq!(Button::from_id(2), None);
        for button in [Button::A, Button::B, Button::X, Button::Y] {
            assert_eq!(Button::from_id(button.id()), Some(button));
        }
    }

    #[test]
    fn test_axis_encoding_matches_engine_writer() {
        let update = AxisUpdate { controller: 1, x: 0.5, y: -1.0 };
        assert_eq!(update.encode(), "update_axis\n1\n0.5\n-1\n");
    }

    #[test]
    fn test_button_encoding_uses_words() {
        let update = ButtonUpdate { controller: 0, button: 4, state: true };
        assert_eq!(update.encode(), "update_button\n0\n4\ntrue\n");
    }

    #[test]
    fn test_read_engine_encoded_axis() {
        let encoded = AxisUpdate { controller: 2, x: 0.25, y: 0.75 }.encode();
        let mut cursor = InputCursor::new(Cursor::new(encoded.into_bytes()));
        assert_eq!(cursor.read_line().unwrap(), "update_axis");

        let update = AxisUpdate::read_from(&mut cursor).unwrap();
        assert_eq!(update.controller, 2);
        assert_eq!(update.x, 0.25);
        assert_eq!(update.y, 0.75);
    }

    #[test]
    fn test_bad_axis_value_consumes_all_arguments() {
        let mut cursor = InputCursor::new(Cursor::new(b"1\nabc\n3.5\nset_background\n".to_vec()));
        let err = AxisUpdate::read_from(&mut cursor).unwrap_err();

        assert!(err.is_malformed_input());
        assert_eq!(cursor.read_line().unwrap(), "set_background");
    }

    #[test]
    fn test_bad_button_state_consumes_all_arguments() {
        let mut cursor = InputCursor::new(Cursor::new(b"0\n1\nmaybe\nexit\n".to_vec()));
        assert!(ButtonUpdate::read_from(&mut cursor).is_err());
        assert_eq!(cursor.read_line().unwrap(), "exit");
    }

    #[test]
    fn test_axis_display_order() {
        let update = AxisUpdate { controller: 1, x: 2.5, y: 3.5 };
        assert_eq!(update.to_string(), "controller 1 axis x 2.5 y 3.5");
    }

    #[test]
    fn test_button_display() {
        let known = ButtonUpdate { controller: 1, button: 0, state: true };
        assert_eq!(known.to_string(), "controller 1 button 0 (A) pressed");

        let unknown = ButtonUpdate { controller: 1, button: 9, state: false };
        assert_eq!(unknown.to_string(), "controller 1 button 9 released");
    }
}
