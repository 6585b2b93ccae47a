//! Working directory and `.env` scaffolding
//!
//! Both operations are idempotent: directories are created only when
//! missing, and an existing config file is never written to.

use envboot_fs::{NormalizedPath, io};
use tracing::info;

use crate::config::BootstrapConfig;
use crate::envfile;
use crate::error::Result;

/// Which branch config scaffolding took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOutcome {
    /// The config file already existed and was left alone
    AlreadyPresent,
    /// The template was copied verbatim
    CopiedFromTemplate { template: NormalizedPath },
    /// No template was found; defaults were written
    Synthesized,
}

impl ConfigOutcome {
    /// Whether this run wrote the config file.
    pub fn created(&self) -> bool {
        !matches!(self, Self::AlreadyPresent)
    }
}

/// Ensure the input and output directories exist.
///
/// Returns the directories created by this call.
pub fn ensure_directories(config: &BootstrapConfig) -> Result<Vec<NormalizedPath>> {
    let mut created = Vec::new();
    for dir in [&config.input_dir, &config.output_dir] {
        if io::ensure_dir(dir)? {
            info!(path = %dir, "Created working directory");
            created.push(dir.clone());
        }
    }
    Ok(created)
}

/// Decide which branch [`scaffold_config`] would take, without writing.
pub fn plan_config(config: &BootstrapConfig) -> ConfigOutcome {
    if config.config_file.exists() {
        ConfigOutcome::AlreadyPresent
    } else if config.template.is_file() {
        ConfigOutcome::CopiedFromTemplate {
            template: config.template.clone(),
        }
    } else {
        ConfigOutcome::Synthesized
    }
}

/// Ensure the config file exists without ever overwriting it.
///
/// If a file appears at the config path between the existence check and
/// the write, the write is refused and the outcome is
/// [`ConfigOutcome::AlreadyPresent`].
pub fn scaffold_config(config: &BootstrapConfig) -> Result<ConfigOutcome> {
    let outcome = plan_config(config);

    let written = match &outcome {
        ConfigOutcome::AlreadyPresent => return Ok(outcome),
        ConfigOutcome::CopiedFromTemplate { template } => io::copy_new(template, &config.config_file),
        ConfigOutcome::Synthesized => {
            io::write_new(&config.config_file, envfile::render_defaults(config).as_bytes())
        }
    };

    match written {
        Ok(()) => {
            info!(path = %config.config_file, outcome = ?outcome, "Created config file");
            Ok(outcome)
        }
        Err(envboot_fs::Error::AlreadyExists { .. }) => Ok(ConfigOutcome::AlreadyPresent),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_plan_prefers_existing_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".env"), "A=1\n").unwrap();
        std::fs::write(temp.path().join(".env.example"), "B=2\n").unwrap();

        let config = BootstrapConfig::new(temp.path());
        assert_eq!(plan_config(&config), ConfigOutcome::AlreadyPresent);
    }

    #[test]
    fn test_plan_ignores_template_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".env.example")).unwrap();

        let config = BootstrapConfig::new(temp.path());
        assert_eq!(plan_config(&config), ConfigOutcome::Synthesized);
    }

    #[test]
    fn test_ensure_directories_reports_only_new() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("in")).unwrap();

        let config = BootstrapConfig::new(temp.path());
        let created = ensure_directories(&config).unwrap();
        assert_eq!(created, vec![config.output_dir.clone()]);
        assert!(ensure_directories(&config).unwrap().is_empty());
    }
}
