//! Console rendering of bootstrap progress

use std::io::Write;

use colored::Colorize;
use envboot_core::{ConfigOutcome, Event, Reporter};

/// Writes one or more status lines per [`Event`].
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn ok(&mut self, message: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{} {}", "OK".green().bold(), message);
    }

    fn warn(&mut self, message: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{} {}", "WARN".yellow().bold(), message);
    }

    fn detail(&mut self, message: impl std::fmt::Display) {
        let _ = writeln!(self.out, "   {}", message);
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: Event) {
        match event {
            Event::StepStarted(step) => {
                let _ = writeln!(self.out, "{} {}...", "=>".blue().bold(), step);
            }
            Event::InterpreterFound { program, version } => {
                self.ok(format!("Found {} ({})", version, program.cyan()))
            }
            Event::EnvironmentRemoved { path } => {
                self.detail(format!("Removed existing environment {}", path.cyan()))
            }
            Event::EnvironmentCreated { path } => {
                self.ok(format!("Virtual environment created at {}", path.cyan()))
            }
            Event::PipUpgraded => self.ok("pip upgraded"),
            Event::ManifestMissing { path } => self.warn(format!(
                "{} not found, installing the fallback package set",
                path.cyan()
            )),
            Event::DependenciesInstalled { source } => {
                self.ok(format!("Dependencies installed from {}", source))
            }
            Event::DirectoryCreated { path } => self.ok(format!("Created {}/", path.cyan())),
            Event::DirectoryPresent { path } => {
                self.detail(format!("{}/ already exists", path).dimmed())
            }
            Event::Config { outcome, path } => match outcome {
                ConfigOutcome::AlreadyPresent => {
                    self.ok(format!("{} already exists, leaving it untouched", path.cyan()))
                }
                ConfigOutcome::CopiedFromTemplate { template } => {
                    let name = template.file_name().unwrap_or(template.as_str()).to_string();
                    self.ok(format!("Created {} from {}", path.cyan(), name))
                }
                ConfigOutcome::Synthesized => {
                    self.ok(format!("Created {} with default settings", path.cyan()))
                }
            },
            Event::EditSecret { path, key } => {
                self.detail(format!("Edit {} and set {}", path.cyan(), key.yellow()))
            }
            Event::MissingKeys { path, keys } => self.warn(format!(
                "{} is missing: {}",
                path,
                keys.join(", ").yellow()
            )),
            Event::ConfigUnparseable { path, message } => {
                self.warn(format!("Could not parse {}: {}", path, message))
            }
            Event::SmokeTestPassed { modules } => {
                self.ok(format!("All {} required modules import cleanly", modules))
            }
            Event::NextSteps(steps) => {
                let _ = writeln!(self.out);
                let _ = writeln!(self.out, "{}", "Next steps:".bold());
                for (i, step) in steps.iter().enumerate() {
                    self.detail(format!("{}. {}", i + 1, step));
                }
                let _ = writeln!(self.out);
            }
            Event::ClipboardCopied { text } => {
                self.ok(format!("Copied `{}` to the clipboard", text.cyan()))
            }
            Event::ClipboardUnavailable { reason } => {
                self.detail(format!("Clipboard not available ({})", reason).dimmed())
            }
            Event::PlaceholderReminder { path, key } => self.warn(format!(
                "Remember to replace the placeholder {} in {} before starting the server",
                key.yellow(),
                path.cyan()
            )),
            Event::SecretNotSet { path, key } => self.warn(format!(
                "{} is not set in {}; add it before starting the server",
                key.yellow(),
                path.cyan()
            )),
            Event::Planned(action) => {
                let _ = writeln!(self.out, "   {} {}", "would".dimmed(), action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envboot_core::{PlannedAction, Step};
    use pretty_assertions::assert_eq;

    fn render(events: Vec<Event>) -> String {
        colored::control::set_override(false);
        let mut reporter = ConsoleReporter::new(Vec::new());
        for event in events {
            reporter.report(event);
        }
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_step_header() {
        let text = render(vec![Event::StepStarted(Step::Interpreter)]);
        assert_eq!(text, "=> Checking Python installation...\n");
    }

    #[test]
    fn test_next_steps_are_numbered() {
        let text = render(vec![Event::NextSteps(vec![
            "Activate".to_string(),
            "Start".to_string(),
        ])]);
        assert!(text.contains("   1. Activate\n"));
        assert!(text.contains("   2. Start\n"));
    }

    #[test]
    fn test_reminder_names_key_and_file() {
        let text = render(vec![Event::PlaceholderReminder {
            path: ".env".to_string(),
            key: "OPENAI_API_KEY".to_string(),
        }]);
        assert!(text.starts_with("WARN "));
        assert!(text.contains("OPENAI_API_KEY"));
        assert!(text.contains(".env"));
    }

    #[test]
    fn test_unset_secret_has_its_own_wording() {
        let text = render(vec![Event::SecretNotSet {
            path: ".env".to_string(),
            key: "OPENAI_API_KEY".to_string(),
        }]);
        assert_eq!(
            text,
            "WARN OPENAI_API_KEY is not set in .env; add it before starting the server\n"
        );
        assert!(!text.contains("placeholder"));
    }

    #[test]
    fn test_planned_action() {
        let text = render(vec![Event::Planned(PlannedAction::UpgradePip)]);
        assert_eq!(text, "   would upgrade pip\n");
    }
}
