//! Line-oriented save-game format used by star views.
//!
//! Every value sits on its own line, prefixed by `indent` tab characters that
//! mirror the nesting of the object being saved. Readers ignore the indent.
//! Integers are written in decimal and floats in the shortest form that
//! reads back to the same value. Strings are double-quoted with `\"` and
//! `\\` escapes.

use std::io::{BufRead, Write};

use crate::error::SaveFileError;

/// Writes indented value lines to a borrowed stream.
pub struct SaveWriter<'a> {
    out: &'a mut dyn Write,
}

impl<'a> SaveWriter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }

    fn write_line(&mut self, indent: usize, text: &str) -> Result<(), SaveFileError> {
        for _ in 0..indent {
            self.out.write_all(b"\t")?;
        }
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn write_number_line(&mut self, value: i64, indent: usize) -> Result<(), SaveFileError> {
        self.write_line(indent, &value.to_string())
    }

    pub fn write_float_line(&mut self, value: f64, indent: usize) -> Result<(), SaveFileError> {
        self.write_line(indent, &format!("{value}"))
    }

    pub fn write_quoted_line(&mut self, text: &str, indent: usize) -> Result<(), SaveFileError> {
        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push('"');
        for c in text.chars() {
            if c == '"' || c == '\\' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        self.write_line(indent, &quoted)
    }
}

/// Reads values written by [`SaveWriter`] back in order.
pub struct SaveReader<'a> {
    input: &'a mut dyn BufRead,
    line: usize,
}

impl<'a> SaveReader<'a> {
    pub fn new(input: &'a mut dyn BufRead) -> Self {
        Self { input, line: 0 }
    }

    /// 1-based number of the last line read.
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Result<String, SaveFileError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(SaveFileError::UnexpectedEof);
        }
        self.line += 1;
        Ok(buf.trim().to_string())
    }

    fn parse_error(&self, expected: &'static str) -> SaveFileError {
        SaveFileError::Parse {
            line: self.line,
            expected,
        }
    }

    pub fn read_number(&mut self) -> Result<i64, SaveFileError> {
        let text = self.next_line()?;
        text.parse().map_err(|_| self.parse_error("an integer"))
    }

    pub fn read_float(&mut self) -> Result<f64, SaveFileError> {
        let text = self.next_line()?;
        text.parse().map_err(|_| self.parse_error("a float"))
    }

    pub fn read_quoted(&mut self) -> Result<String, SaveFileError> {
        let text = self.next_line()?;
        let inner = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .ok_or_else(|| self.parse_error("a quoted string"))?;

        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(self.parse_error("a complete escape")),
                }
            } else {
                out.push(c);
            }
        }
        Ok(out)
    }
}
