//! Line and token reads over the shared input stream
//!
//! The engine writes a command name on its own line and, for commands that
//! take arguments, the argument values after it. Values may be spread over
//! several lines or share one line, so typed reads work on whitespace
//! separated tokens and pull further lines as needed.

use std::collections::VecDeque;
use std::io::BufRead;
use tracing::debug;

use crate::error::{GameProtocolError, GameResult};

/// Cursor over the input stream shared by every command handler
#[derive(Debug)]
pub struct InputCursor<R> {
    reader: R,
    pending: VecDeque<String>,
    lines_read: usize,
}

impl<R: BufRead> InputCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            lines_read: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read the next full line without its terminator.
    ///
    /// Tokens left over from a partially consumed argument line are dropped.
    pub fn read_line(&mut self) -> GameResult<String> {
        if !self.pending.is_empty() {
            debug!(
                line = self.lines_read,
                leftover = ?self.pending,
                "discarding unread argument tokens"
            );
            self.pending.clear();
        }

        self.read_raw_line()
    }

    /// Next whitespace separated token, reading more lines if required
    pub fn next_token(&mut self) -> GameResult<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let line = self.read_raw_line()?;
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Take the next `count` tokens without interpreting them
    pub fn next_tokens(&mut self, count: usize) -> GameResult<Vec<String>> {
        (0..count).map(|_| self.next_token()).collect()
    }

    pub fn next_int(&mut self) -> GameResult<i32> {
        parse_int(self.next_token()?)
    }

    /// Next finite floating-point value
    pub fn next_float(&mut self) -> GameResult<f64> {
        parse_float(self.next_token()?)
    }

    /// Next boolean, written as `true`/`false` or `1`/`0`
    pub fn next_bool(&mut self) -> GameResult<bool> {
        parse_bool(self.next_token()?)
    }

    /// Invalid UTF-8 is replaced rather than rejected, so a garbled line
    /// reaches dispatch as an unknown command.
    fn read_raw_line(&mut self) -> GameResult<String> {
        let mut bytes = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut bytes)
            .map_err(|e| GameProtocolError::io("input", e))?;

        if read == 0 {
            return Err(GameProtocolError::EndOfInput);
        }

        if bytes.ends_with(b"\n") {
            bytes.pop();
            if bytes.ends_with(b"\r") {
                bytes.pop();
            }
        }

        self.lines_read += 1;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub fn parse_int(token: String) -> GameResult<i32> {
    token
        .parse::<i32>()
        .map_err(|_| GameProtocolError::malformed("integer", token))
}

pub fn parse_float(token: String) -> GameResult<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GameProtocolError::malformed("finite float", token)),
    }
}

pub fn parse_bool(token: String) -> GameResult<bool> {
    match token.as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(GameProtocolError::malformed("boolean", token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(input: &str) -> InputCursor<Cursor<Vec<u8>>> {
        InputCursor::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_read_line_strips_only_terminator() {
        let mut input = cursor("  build_room \r\nexit\n");
        assert_eq!(input.read_line().unwrap(), "  build_room ");
        assert_eq!(input.read_line().unwrap(), "exit");
        assert!(matches!(input.read_line(), Err(GameProtocolError::EndOfInput)));
        assert_eq!(input.lines_read(), 2);
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut input = cursor("exit");
        assert_eq!(input.read_line().unwrap(), "exit");
        assert!(matches!(input.read_line(), Err(GameProtocolError::EndOfInput)));
    }

    #[test]
    fn test_empty_line_is_a_line() {
        let mut input = cursor("\nexit\n");
        assert_eq!(input.read_line().unwrap(), "");
        assert_eq!(input.read_line().unwrap(), "exit");
    }

    #[test]
    fn test_tokens_span_lines() {
        let mut input = cursor("1\n2.5\n3.5\n");
        assert_eq!(input.next_int().unwrap(), 1);
        assert_eq!(input.next_float().unwrap(), 2.5);
        assert_eq!(input.next_float().unwrap(), 3.5);
    }

    #[test]
    fn test_tokens_on_one_line() {
        let mut input = cursor("0 3 true\nexit\n");
        assert_eq!(input.next_int().unwrap(), 0);
        assert_eq!(input.next_int().unwrap(), 3);
        assert!(input.next_bool().unwrap());
        assert_eq!(input.read_line().unwrap(), "exit");
    }

    #[test]
    fn test_leftover_tokens_dropped_before_next_line() {
        let mut input = cursor("7 extra tokens\nexit\n");
        assert_eq!(input.next_int().unwrap(), 7);
        assert_eq!(input.read_line().unwrap(), "exit");
    }

    #[test]
    fn test_blank_lines_skipped_between_tokens() {
        let mut input = cursor("\n   \n42\n");
        assert_eq!(input.next_int().unwrap(), 42);
    }

    #[test]
    fn test_malformed_values() {
        let mut input = cursor("x 1.5 nan maybe\n");
        assert!(matches!(
            input.next_int(),
            Err(GameProtocolError::MalformedToken { expected: "integer", .. })
        ));
        assert!(input.next_int().is_err());
        assert!(matches!(
            input.next_float(),
            Err(GameProtocolError::MalformedToken { expected: "finite float", .. })
        ));
        assert!(matches!(
            input.next_bool(),
            Err(GameProtocolError::MalformedToken { expected: "boolean", .. })
        ));
    }

    #[test]
    fn test_numeric_booleans() {
        let mut input = cursor("1 0 false\n");
        assert!(input.next_bool().unwrap());
        assert!(!input.next_bool().unwrap());
        assert!(!input.next_bool().unwrap());
    }

    #[test]
    fn test_invalid_utf8_line_is_replaced() {
        let mut input = InputCursor::new(Cursor::new(b"\xff\xfe\r\nexit\n".to_vec()));
        assert_eq!(input.read_line().unwrap(), "\u{fffd}\u{fffd}");
        assert_eq!(input.read_line().unwrap(), "exit");
        assert_eq!(input.lines_read(), 2);
    }

    #[test]
    fn test_next_tokens_spans_lines() {
        let mut input = cursor("1\nabc\n3.5\nexit\n");
        assert_eq!(input.next_tokens(3).unwrap(), vec!["1", "abc", "3.5"]);
        assert_eq!(input.read_line().unwrap(), "exit");
        assert!(matches!(input.next_tokens(1), Err(GameProtocolError::EndOfInput)));
    }

    #[test]
    fn test_token_at_end_of_input() {
        let mut input = cursor("5\n");
        assert_eq!(input.next_int().unwrap(), 5);
        assert!(matches!(input.next_int(), Err(GameProtocolError::EndOfInput)));
    }
}
