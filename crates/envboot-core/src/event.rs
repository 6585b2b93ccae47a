//! Progress events emitted by the bootstrapper

use std::fmt;

use crate::scaffold::ConfigOutcome;

/// The linear bootstrap steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Interpreter,
    Environment,
    Dependencies,
    Directories,
    Config,
    SmokeTest,
    Guidance,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Interpreter => "Checking Python installation",
            Self::Environment => "Creating virtual environment",
            Self::Dependencies => "Installing dependencies",
            Self::Directories => "Creating working directories",
            Self::Config => "Setting up configuration",
            Self::SmokeTest => "Verifying installation",
            Self::Guidance => "Setup complete",
        };
        f.write_str(label)
    }
}

/// An action a dry run would have performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    RemoveEnvironment { path: String },
    CreateEnvironment { path: String },
    UpgradePip,
    Install { source: String, packages: usize },
    CreateDirectory { path: String },
    KeepConfig { path: String },
    CopyTemplate { template: String, path: String },
    SynthesizeConfig { path: String },
    SmokeTest { modules: Vec<String> },
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveEnvironment { path } => write!(f, "remove existing environment {}", path),
            Self::CreateEnvironment { path } => write!(f, "create virtual environment {}", path),
            Self::UpgradePip => write!(f, "upgrade pip"),
            Self::Install { source, packages } => {
                write!(f, "install {} package(s) from {}", packages, source)
            }
            Self::CreateDirectory { path } => write!(f, "create directory {}", path),
            Self::KeepConfig { path } => write!(f, "keep existing {}", path),
            Self::CopyTemplate { template, path } => write!(f, "copy {} to {}", template, path),
            Self::SynthesizeConfig { path } => write!(f, "write default {}", path),
            Self::SmokeTest { modules } => write!(f, "import {}", modules.join(", ")),
        }
    }
}

/// A single progress report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StepStarted(Step),
    InterpreterFound { program: String, version: String },
    EnvironmentRemoved { path: String },
    EnvironmentCreated { path: String },
    PipUpgraded,
    ManifestMissing { path: String },
    DependenciesInstalled { source: String },
    DirectoryCreated { path: String },
    DirectoryPresent { path: String },
    Config { outcome: ConfigOutcome, path: String },
    /// The user has to put a real value in `key`
    EditSecret { path: String, key: String },
    MissingKeys { path: String, keys: Vec<String> },
    ConfigUnparseable { path: String, message: String },
    SmokeTestPassed { modules: usize },
    NextSteps(Vec<String>),
    ClipboardCopied { text: String },
    ClipboardUnavailable { reason: String },
    /// Final reminder: the placeholder secret is still in place
    PlaceholderReminder { path: String, key: String },
    /// Final reminder: the secret is absent or empty
    SecretNotSet { path: String, key: String },
    Planned(PlannedAction),
}

/// Receives progress events as the bootstrap runs.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

impl Reporter for Vec<Event> {
    fn report(&mut self, event: Event) {
        self.push(event);
    }
}
