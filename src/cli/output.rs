//! Colored terminal output.
//!
//! Progress and results go to stdout, warnings and errors to stderr. Color is
//! only used when the stream is a terminal.

use std::io::{IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Terminal output honoring the verbose and quiet switches.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager. `quiet` wins over `verbose`.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
        }
    }

    /// Whether verbose messages are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Plain message.
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(None, false, "", message)
    }

    /// Step in progress.
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(Some(Color::Cyan), false, "", message)
    }

    /// Completed step.
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(Some(Color::Green), true, "✓ ", message)
    }

    /// Detail shown only in verbose mode.
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.write_stdout(None, false, "  ", message)
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_stdout(None, false, "  ", message)
    }

    /// Warning, suppressed in quiet mode.
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_stream(
            Self::stderr(),
            Some(Color::Yellow),
            true,
            "warning: ",
            message,
        )
    }

    /// Error, always printed.
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        Self::write_stream(Self::stderr(), Some(Color::Red), true, "Error: ", message)
    }

    fn write_stdout(
        &self,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> std::io::Result<()> {
        Self::write_stream(Self::stdout(), color, bold, prefix, message)
    }

    fn stdout() -> StandardStream {
        let choice = if std::io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        StandardStream::stdout(choice)
    }

    fn stderr() -> StandardStream {
        let choice = if std::io::stderr().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        StandardStream::stderr(choice)
    }

    fn write_stream(
        mut stream: StandardStream,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> std::io::Result<()> {
        if !prefix.is_empty() {
            stream.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
            write!(stream, "{}", prefix)?;
            stream.reset()?;
            writeln!(stream, "{}", message)
        } else {
            stream.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
            write!(stream, "{}", message)?;
            stream.reset()?;
            writeln!(stream)
        }
    }
}
