//! Formatter seam.
//!
//! Canonical styling of the generated source is left to an external tool. The
//! generator calls the configured [`Formatter`] exactly once, with the fixed
//! [`FormatOptions::typescript`] option set.

use std::io::{self, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::FormatError;

/// Syntax the formatter should parse the source as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceParser {
    /// `--parser typescript`
    TypeScript,
}

/// Options handed to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Syntax of the source.
    pub parser: SourceParser,
    /// Prefer `'` over `"` for strings.
    pub single_quote: bool,
}

impl FormatOptions {
    /// Parse as TypeScript, prefer single quotes.
    pub const fn typescript() -> Self {
        FormatOptions {
            parser: SourceParser::TypeScript,
            single_quote: true,
        }
    }

    /// Prettier-style command line flags for these options.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["--parser".to_string()];
        match self.parser {
            SourceParser::TypeScript => args.push("typescript".to_string()),
        }
        if self.single_quote {
            args.push("--single-quote".to_string());
        }
        args
    }
}

/// Turns generated source into its final, styled form.
pub trait Formatter {
    /// Return the styled source, or why it could not be produced.
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError>;
}

impl<F> Formatter for F
where
    F: Fn(&str, &FormatOptions) -> Result<String, FormatError>,
{
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError> {
        self(source, options)
    }
}

/// Returns the source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, source: &str, _options: &FormatOptions) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

/// Pipes the source through an external program (e.g. `prettier`) on stdin/stdout.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// Run `program` with no extra arguments.
    pub fn new(program: impl Into<String>) -> Self {
        CommandFormatter {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `npx prettier`, reading from stdin.
    pub fn prettier() -> Self {
        CommandFormatter::new("npx").with_args(["prettier"])
    }

    /// Build from a whitespace-separated command line such as `npx prettier`.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?;
        Some(CommandFormatter::new(program).with_args(parts))
    }

    /// Arguments placed before the option flags.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name as passed to [`Command::new`].
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the option flags.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError> {
        let flags = options.to_args();
        debug!("running formatter: {} {} {}", self.program, self.args.join(" "), flags.join(" "));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(&flags)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Stdin is fed from a second thread while this one drains stdout and
        // stderr, so a program that streams its output cannot block on a full pipe.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || write_source(stdin, source));
            (child.wait_with_output(), writer.join())
        });

        let output = output?;
        if !output.status.success() {
            return Err(FormatError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match written {
            Ok(result) => result?,
            Err(_) => return Err(FormatError::Other("formatter input thread panicked".to_string())),
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Write `source` and close the pipe. A program that exits without reading
/// its input is reported through its exit status instead.
fn write_source(stdin: Option<ChildStdin>, source: &str) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin.write_all(source.as_bytes()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
