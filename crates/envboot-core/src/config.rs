//! Bootstrap configuration
//!
//! Every location the bootstrapper touches is carried explicitly in
//! [`BootstrapConfig`]. Values come from built-in defaults, then an optional
//! `envboot.toml`, then whatever the caller overrides.

use std::path::Path;

use envboot_fs::{NormalizedPath, io};
use envboot_python::{PackageSource, SMOKE_IMPORTS, VirtualEnv, interpreter};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// File name of the optional per-project config file.
pub const CONFIG_FILE_NAME: &str = "envboot.toml";

/// Resolved bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Project directory everything else is relative to
    pub base: NormalizedPath,
    /// Virtual environment directory, rebuilt every run
    pub env_dir: NormalizedPath,
    /// Optional requirements manifest
    pub manifest: NormalizedPath,
    /// Optional `.env` template
    pub template: NormalizedPath,
    /// Active `.env` file, never overwritten
    pub config_file: NormalizedPath,
    pub input_dir: NormalizedPath,
    pub output_dir: NormalizedPath,
    /// Interpreter names probed in order
    pub interpreters: Vec<String>,
    /// Packages installed when the manifest is absent
    pub fallback_packages: Vec<String>,
    /// Modules imported by the smoke test
    pub smoke_imports: Vec<String>,
    /// Whether to copy the activation command to the clipboard
    pub clipboard: bool,
    pub server_command: String,
    pub docs_url: String,
}

/// On-disk shape of `envboot.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub env_dir: Option<String>,
    pub manifest: Option<String>,
    pub template: Option<String>,
    pub config_file: Option<String>,
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub interpreters: Option<Vec<String>>,
    pub fallback_packages: Option<Vec<String>>,
    pub smoke_imports: Option<Vec<String>>,
    pub clipboard: Option<bool>,
    pub server_command: Option<String>,
    pub docs_url: Option<String>,
}

impl BootstrapConfig {
    /// Built-in defaults rooted at `base`.
    pub fn new(base: impl Into<NormalizedPath>) -> Self {
        let base = base.into();
        Self {
            env_dir: base.join("venv"),
            manifest: base.join("requirements.txt"),
            template: base.join(".env.example"),
            config_file: base.join(".env"),
            input_dir: base.join("in"),
            output_dir: base.join("out"),
            interpreters: interpreter::default_candidates(),
            fallback_packages: PackageSource::default_fallback(),
            smoke_imports: SMOKE_IMPORTS.iter().map(|m| m.to_string()).collect(),
            clipboard: true,
            server_command: "python server.py".to_string(),
            docs_url: "http://localhost:8000/docs".to_string(),
            base,
        }
    }

    /// Defaults overlaid with `explicit`, or `<base>/envboot.toml` when no
    /// explicit file is given and one exists.
    ///
    /// An explicit file that does not exist is an error; a missing
    /// `envboot.toml` is not.
    pub fn load(base: impl Into<NormalizedPath>, explicit: Option<&Path>) -> Result<Self> {
        let config = Self::new(base);

        let path = match explicit {
            Some(path) => {
                let path = config.base.resolve(path);
                if !path.is_file() {
                    return Err(Error::ConfigNotFound {
                        path: path.to_native(),
                    });
                }
                path
            }
            None => {
                let path = config.base.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    return Ok(config);
                }
                path
            }
        };

        debug!(path = %path, "Loading bootstrap config");
        let content = io::read_text(&path)?;
        let file: FileConfig = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })?;
        let config = config.merge(file);
        config.validate()?;
        Ok(config)
    }

    /// Check that rebuilding the environment cannot delete anything else.
    ///
    /// The environment directory is removed wholesale on every run, so it
    /// must not be the project directory or one of its parents, and must
    /// not hold the config file, template, manifest or working directories.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidEnvDir {
            path: self.env_dir.to_native(),
            reason,
        };

        if self.env_dir.contains(&self.base) {
            return Err(invalid(
                "it is the project directory or one of its parents".to_string(),
            ));
        }

        let protected = [
            &self.config_file,
            &self.template,
            &self.manifest,
            &self.input_dir,
            &self.output_dir,
        ];
        if let Some(path) = protected.into_iter().find(|p| self.env_dir.contains(p)) {
            return Err(invalid(format!("it would delete {}", self.display_path(path))));
        }
        Ok(())
    }

    /// Apply values from a config file; relative paths resolve against `base`.
    pub fn merge(mut self, file: FileConfig) -> Self {
        let base = self.base.clone();
        let resolve = |value: Option<String>, current: &mut NormalizedPath| {
            if let Some(value) = value {
                *current = base.resolve(value).clean();
            }
        };

        resolve(file.env_dir, &mut self.env_dir);
        resolve(file.manifest, &mut self.manifest);
        resolve(file.template, &mut self.template);
        resolve(file.config_file, &mut self.config_file);
        resolve(file.input_dir, &mut self.input_dir);
        resolve(file.output_dir, &mut self.output_dir);

        if let Some(interpreters) = file.interpreters {
            self.interpreters = interpreters;
        }
        if let Some(packages) = file.fallback_packages {
            self.fallback_packages = packages;
        }
        if let Some(modules) = file.smoke_imports {
            self.smoke_imports = modules;
        }
        if let Some(clipboard) = file.clipboard {
            self.clipboard = clipboard;
        }
        if let Some(command) = file.server_command {
            self.server_command = command;
        }
        if let Some(url) = file.docs_url {
            self.docs_url = url;
        }
        self
    }

    pub fn venv(&self) -> VirtualEnv {
        VirtualEnv::new(self.env_dir.clone())
    }

    /// `path` relative to `base` when it lives underneath it.
    pub fn display_path(&self, path: &NormalizedPath) -> String {
        let base = self.base.as_str().trim_end_matches('/');
        path.as_str()
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(path.as_str())
            .to_string()
    }

    /// The activation command as the user should type it from `base`.
    pub fn activation_command(&self) -> String {
        VirtualEnv::activation_command(&self.display_path(&self.env_dir))
    }
}
