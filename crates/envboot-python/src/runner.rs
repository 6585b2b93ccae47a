//! Subprocess execution seam
//!
//! Every external command the bootstrapper issues is described as a
//! [`CommandSpec`] and handed to a [`CommandRunner`]. The production runner
//! wraps `std::process::Command`; tests provide scripted runners.

use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

/// How a command's output streams are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Capture stdout and stderr into the returned [`CommandOutput`].
    #[default]
    Capture,
    /// Inherit stdout so the user sees progress. Stderr is echoed live
    /// and its last lines are kept in [`CommandOutput::stderr`].
    Stream,
}

/// A command to run: program, arguments, optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub mode: OutputMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            mode: OutputMode::Capture,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn streaming(mut self) -> Self {
        self.mode = OutputMode::Stream;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of a finished command.
///
/// In [`OutputMode::Stream`] `stdout` is empty and `stderr` holds at most
/// the last [`STDERR_TAIL_LINES`] lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code for error reporting; signal termination maps to -1.
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(-1)
    }

    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Executes commands on behalf of the bootstrapper.
///
/// Returns `Err` only when the process could not be launched at all
/// (e.g. the program is not on `PATH`); a non-zero exit is a successful
/// run with a failing [`CommandOutput`].
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput>;
}

/// Runs commands with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput> {
        debug!(command = %spec, "Running command");

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).stdin(Stdio::null());
        if let Some(ref dir) = spec.cwd {
            cmd.current_dir(dir);
        }

        match spec.mode {
            OutputMode::Capture => {
                let output = cmd.output()?;
                Ok(CommandOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                })
            }
            OutputMode::Stream => {
                let mut child = cmd
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::piped())
                    .spawn()?;
                let tee = child
                    .stderr
                    .take()
                    .map(|stderr| thread::spawn(move || echo_stderr(stderr)));

                let status = child.wait()?;
                let stderr = tee.and_then(|handle| handle.join().ok()).unwrap_or_default();
                Ok(CommandOutput {
                    code: status.code(),
                    stdout: String::new(),
                    stderr,
                })
            }
        }
    }
}

/// Lines of streamed stderr kept for error reporting.
pub const STDERR_TAIL_LINES: usize = 20;

/// Copy `stderr` to our own stderr as it arrives and return its tail.
fn echo_stderr(stderr: impl Read) -> String {
    let mut reader = BufReader::new(stderr);
    let mut sink = std::io::stderr();
    let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let _ = sink.write_all(&line);
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(String::from_utf8_lossy(&line).trim_end().to_string());
            }
        }
    }

    Vec::from(tail).join("\n")
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput> {
        (**self).run(spec)
    }
}
