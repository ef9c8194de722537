//! Console abstraction for the interactive menu
//!
//! The menu only talks to a `Console`, so it can be driven by a script in
//! tests and by the real terminal in the binary.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crossterm::style::Stylize;

use crate::error::{LibraryError, LibraryResult};

/// How a line of output should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Error,
    Heading,
}

/// Line-oriented console
pub trait Console {
    /// Show `prompt` and read one line without its line ending.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> LibraryResult<Option<String>>;

    /// Write `text` followed by a newline
    fn write_line(&mut self, tone: Tone, text: &str) -> LibraryResult<()>;

    fn plain(&mut self, text: &str) -> LibraryResult<()> {
        self.write_line(Tone::Plain, text)
    }

    fn success(&mut self, text: &str) -> LibraryResult<()> {
        self.write_line(Tone::Success, text)
    }

    fn error(&mut self, text: &str) -> LibraryResult<()> {
        self.write_line(Tone::Error, text)
    }

    fn heading(&mut self, text: &str) -> LibraryResult<()> {
        self.write_line(Tone::Heading, text)
    }
}

/// Console over any reader/writer pair, colored with ANSI styles
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Consume the console, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }
}

impl TerminalConsole<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), color)
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> LibraryResult<Option<String>> {
        write!(self.output, "{}", prompt).map_err(console_error)?;
        self.output.flush().map_err(console_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(console_error)?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }

    fn write_line(&mut self, tone: Tone, text: &str) -> LibraryResult<()> {
        let result = if !self.color {
            writeln!(self.output, "{}", text)
        } else {
            match tone {
                Tone::Plain => writeln!(self.output, "{}", text),
                Tone::Success => writeln!(self.output, "{}", text.green()),
                Tone::Error => writeln!(self.output, "{}", text.red()),
                Tone::Heading => writeln!(self.output, "{}", text.yellow()),
            }
        };
        result.map_err(console_error)
    }
}

fn console_error(err: io::Error) -> LibraryError {
    LibraryError::Io(format!("Console I/O failed: {}", err))
}
