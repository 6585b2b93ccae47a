//! Interpreter discovery: find a Python on PATH and read its version

use std::fmt;
use std::io::ErrorKind;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, CommandSpec};

/// Interpreter names probed when none are configured.
pub const DEFAULT_CANDIDATES: &[&str] = &["python3", "python"];

/// A parsed `Python X.Y.Z` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl PythonVersion {
    /// Parse the output of `python --version`.
    ///
    /// Accepts `Python 3.12.4`, `Python 3.13.0rc1` and bare `3.11`.
    pub fn parse(output: &str) -> Option<Self> {
        let trimmed = output.trim();
        let version = trimmed.strip_prefix("Python ").unwrap_or(trimmed);
        let mut parts = version.split('.');

        let major = parts.next()?.parse().ok()?;
        let minor = leading_digits(parts.next()?)?;
        let patch = parts.next().and_then(leading_digits);

        Some(Self {
            major,
            minor,
            patch,
        })
    }
}

fn leading_digits(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// A Python interpreter that answered `--version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Program name or path used to launch it
    pub program: String,
    /// Raw version banner as printed by the interpreter
    pub banner: String,
    /// Parsed version, `None` if the banner was not understood
    pub version: Option<PythonVersion>,
}

impl Interpreter {
    /// Probe `candidates` in order and return the first one that runs.
    ///
    /// A candidate that cannot be launched, or exits non-zero, is skipped.
    /// An unparseable version banner does not disqualify a candidate.
    pub fn discover<R: CommandRunner>(runner: &R, candidates: &[String]) -> Result<Self> {
        for candidate in candidates {
            let spec = CommandSpec::new(candidate.as_str()).arg("--version");
            let output = match runner.run(&spec) {
                Ok(output) => output,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(candidate = %candidate, "Interpreter candidate not on PATH");
                    continue;
                }
                Err(e) => {
                    debug!(candidate = %candidate, error = %e, "Interpreter candidate failed to launch");
                    continue;
                }
            };

            if !output.success() {
                debug!(candidate = %candidate, code = output.exit_code(), "Interpreter candidate exited non-zero");
                continue;
            }

            // Python 2 prints its version banner on stderr
            let banner = if output.stdout.trim().is_empty() {
                output.stderr.trim().to_string()
            } else {
                output.stdout.trim().to_string()
            };
            let version = PythonVersion::parse(&banner);
            if version.is_none() {
                warn!(candidate = %candidate, banner = %banner, "Could not parse interpreter version");
            }

            return Ok(Self {
                program: candidate.clone(),
                banner,
                version,
            });
        }

        Err(Error::InterpreterNotFound {
            candidates: candidates.to_vec(),
        })
    }

    /// Version for display, falling back to the raw banner.
    pub fn version_label(&self) -> String {
        match self.version {
            Some(version) => version.to_string(),
            None if self.banner.is_empty() => "unknown".to_string(),
            None => self.banner.clone(),
        }
    }
}

/// Default candidate list as owned strings.
pub fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect()
}
