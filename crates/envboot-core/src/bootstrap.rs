//! The linear bootstrap routine
//!
//! Steps run strictly in order and the first error aborts the run. No step
//! touches the filesystem until an interpreter has been found.

use envboot_fs::NormalizedPath;
use envboot_python::{CommandRunner, Interpreter, PackageSource, packages, smoke};
use tracing::{info, warn};

use crate::clipboard::ClipboardWriter;
use crate::config::BootstrapConfig;
use crate::envfile::{self, EnvFileStatus, SecretState};
use crate::error::Result;
use crate::event::{Event, PlannedAction, Reporter, Step};
use crate::scaffold::{self, ConfigOutcome};

/// Summary of a completed bootstrap.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub interpreter: Interpreter,
    /// Whether a previous environment was deleted
    pub environment_replaced: bool,
    pub source: PackageSource,
    /// Working directories created by this run
    pub created_dirs: Vec<NormalizedPath>,
    pub config: ConfigOutcome,
    pub env_status: EnvFileStatus,
    pub next_steps: Vec<String>,
    pub clipboard_copied: bool,
}

/// Runs the bootstrap sequence against an explicit configuration.
pub struct Bootstrapper<'a, R: CommandRunner> {
    config: &'a BootstrapConfig,
    runner: R,
    clipboard: Option<&'a dyn ClipboardWriter>,
}

impl<'a, R: CommandRunner> Bootstrapper<'a, R> {
    pub fn new(config: &'a BootstrapConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            clipboard: None,
        }
    }

    /// Attach a clipboard; without one the copy step is skipped.
    pub fn with_clipboard(mut self, clipboard: &'a dyn ClipboardWriter) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    fn shown(&self, path: &NormalizedPath) -> String {
        self.config.display_path(path)
    }

    fn discover_interpreter(&self, reporter: &mut dyn Reporter) -> Result<Interpreter> {
        reporter.report(Event::StepStarted(Step::Interpreter));
        let interpreter = Interpreter::discover(&self.runner, &self.config.interpreters)?;
        info!(program = %interpreter.program, version = %interpreter.version_label(), "Found interpreter");
        reporter.report(Event::InterpreterFound {
            program: interpreter.program.clone(),
            version: interpreter.version_label(),
        });
        Ok(interpreter)
    }

    /// Run every step. The first failure aborts and is returned.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<BootstrapReport> {
        let config = self.config;
        config.validate()?;
        let venv = config.venv();

        let interpreter = self.discover_interpreter(reporter)?;

        reporter.report(Event::StepStarted(Step::Environment));
        let environment_replaced = venv.recreate(&self.runner, &interpreter, &config.base)?;
        if environment_replaced {
            reporter.report(Event::EnvironmentRemoved {
                path: self.shown(venv.root()),
            });
        }
        reporter.report(Event::EnvironmentCreated {
            path: self.shown(venv.root()),
        });

        reporter.report(Event::StepStarted(Step::Dependencies));
        packages::upgrade_pip(&self.runner, &venv)?;
        reporter.report(Event::PipUpgraded);
        let source = PackageSource::select(&config.manifest, &config.fallback_packages);
        if let PackageSource::Fallback(_) = source {
            reporter.report(Event::ManifestMissing {
                path: self.shown(&config.manifest),
            });
        }
        packages::install(&self.runner, &venv, &source)?;
        reporter.report(Event::DependenciesInstalled {
            source: source.to_string(),
        });

        reporter.report(Event::StepStarted(Step::Directories));
        let created_dirs = scaffold::ensure_directories(config)?;
        for dir in [&config.input_dir, &config.output_dir] {
            let path = self.shown(dir);
            if created_dirs.contains(dir) {
                reporter.report(Event::DirectoryCreated { path });
            } else {
                reporter.report(Event::DirectoryPresent { path });
            }
        }

        reporter.report(Event::StepStarted(Step::Config));
        let outcome = scaffold::scaffold_config(config)?;
        let config_path = self.shown(&config.config_file);
        reporter.report(Event::Config {
            outcome: outcome.clone(),
            path: config_path.clone(),
        });
        if outcome.created() {
            reporter.report(Event::EditSecret {
                path: config_path.clone(),
                key: envfile::API_KEY.to_string(),
            });
        }
        let env_status = EnvFileStatus::inspect(&config.config_file)?;
        if let Some(ref message) = env_status.parse_error {
            reporter.report(Event::ConfigUnparseable {
                path: config_path.clone(),
                message: message.clone(),
            });
        } else if !env_status.missing_keys.is_empty() {
            reporter.report(Event::MissingKeys {
                path: config_path.clone(),
                keys: env_status.missing_keys.clone(),
            });
        }

        reporter.report(Event::StepStarted(Step::SmokeTest));
        smoke::smoke_test(&self.runner, &venv, &config.smoke_imports)?;
        reporter.report(Event::SmokeTestPassed {
            modules: config.smoke_imports.len(),
        });

        reporter.report(Event::StepStarted(Step::Guidance));
        let next_steps = self.next_steps();
        reporter.report(Event::NextSteps(next_steps.clone()));
        let clipboard_copied = self.copy_activation(reporter);

        let key = envfile::API_KEY.to_string();
        match env_status.secret {
            SecretState::Placeholder => reporter.report(Event::PlaceholderReminder {
                path: config_path,
                key,
            }),
            SecretState::Missing => reporter.report(Event::SecretNotSet {
                path: config_path,
                key,
            }),
            SecretState::Set => {}
        }

        Ok(BootstrapReport {
            interpreter,
            environment_replaced,
            source,
            created_dirs,
            config: outcome,
            env_status,
            next_steps,
            clipboard_copied,
        })
    }

    /// Check the interpreter, then report what [`Bootstrapper::run`] would
    /// do without changing anything on disk.
    pub fn plan(&self, reporter: &mut dyn Reporter) -> Result<Vec<PlannedAction>> {
        let config = self.config;
        config.validate()?;
        let venv = config.venv();

        self.discover_interpreter(reporter)?;

        let mut actions = Vec::new();
        if venv.root().exists() {
            actions.push(PlannedAction::RemoveEnvironment {
                path: self.shown(venv.root()),
            });
        }
        actions.push(PlannedAction::CreateEnvironment {
            path: self.shown(venv.root()),
        });
        actions.push(PlannedAction::UpgradePip);

        let source = PackageSource::select(&config.manifest, &config.fallback_packages);
        actions.push(PlannedAction::Install {
            source: source.to_string(),
            packages: source.requirements()?.len(),
        });

        for dir in [&config.input_dir, &config.output_dir] {
            if !dir.is_dir() {
                actions.push(PlannedAction::CreateDirectory {
                    path: self.shown(dir),
                });
            }
        }

        let path = self.shown(&config.config_file);
        actions.push(match scaffold::plan_config(config) {
            ConfigOutcome::AlreadyPresent => PlannedAction::KeepConfig { path },
            ConfigOutcome::CopiedFromTemplate { template } => PlannedAction::CopyTemplate {
                template: self.shown(&template),
                path,
            },
            ConfigOutcome::Synthesized => PlannedAction::SynthesizeConfig { path },
        });

        if !config.smoke_imports.is_empty() {
            actions.push(PlannedAction::SmokeTest {
                modules: config.smoke_imports.clone(),
            });
        }

        for action in &actions {
            reporter.report(Event::Planned(action.clone()));
        }
        Ok(actions)
    }

    /// Ordered onboarding instructions shown after a successful run.
    pub fn next_steps(&self) -> Vec<String> {
        let config = self.config;
        vec![
            format!("Activate the virtual environment: {}", config.activation_command()),
            format!(
                "Set your OpenAI API key in {}: {}=...",
                self.shown(&config.config_file),
                envfile::API_KEY
            ),
            format!("Start the server: {}", config.server_command),
            format!("Open the API docs: {}", config.docs_url),
        ]
    }

    fn copy_activation(&self, reporter: &mut dyn Reporter) -> bool {
        let Some(clipboard) = self.clipboard.filter(|_| self.config.clipboard) else {
            return false;
        };

        let text = self.config.activation_command();
        match clipboard.write_text(&text) {
            Ok(()) => {
                reporter.report(Event::ClipboardCopied { text });
                true
            }
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable");
                reporter.report(Event::ClipboardUnavailable {
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}
