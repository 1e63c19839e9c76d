//! Blocking, line-oriented console used by every part of the game.
//!
//! The binary wraps locked stdin/stdout; tests wrap a byte slice and a `Vec<u8>`.

use std::io::{BufRead, Write};

use log::trace;

use super::errors::GameError;
use crate::logutil::escape_input;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Print a line of text.
    pub fn say(&mut self, text: &str) -> Result<(), GameError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `count` empty lines.
    pub fn blank(&mut self, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            writeln!(self.output)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), GameError> {
        self.output.flush()?;
        Ok(())
    }

    /// Print `text` without a newline, wait for one line of input and return it trimmed.
    /// Bytes that are not UTF-8 come back as replacement characters.
    pub fn prompt(&mut self, text: &str) -> Result<String, GameError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(GameError::InputClosed);
        }
        trace!("input: {}", escape_input(&raw));
        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    /// Prompt for a number. Like `scanf("%d")`, only a leading integer is read ("3 please" is 3);
    /// `None` when the line does not start with one.
    pub fn prompt_number(&mut self, text: &str) -> Result<Option<i64>, GameError> {
        let line = self.prompt(text)?;
        Ok(leading_int(&line))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let digits_from = usize::from(s.starts_with(|c| c == '+' || c == '-'));
    let end = s[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_from);
    if end == digits_from {
        return None;
    }
    s[..end].parse().ok()
}
