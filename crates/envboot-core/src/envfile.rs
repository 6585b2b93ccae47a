//! The server's `.env` file: default contents and post-scaffold checks

use envboot_fs::{NormalizedPath, io};
use tracing::warn;

use crate::config::BootstrapConfig;
use crate::error::Result;

/// Literal value written in place of a real API key.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

/// The secret the user must fill in.
pub const API_KEY: &str = "OPENAI_API_KEY";

/// Every key the server reads, in the order they are written.
pub const KNOWN_KEYS: &[&str] = &[
    API_KEY,
    "LOG_LEVEL",
    "MAX_CONCURRENT_REQUESTS",
    "REQUEST_TIMEOUT",
    "MAX_SPEAKERS",
    "SENDER_NAME",
    "SENDER_TITLE",
    "OUTPUT_DIR",
    "INPUT_DIR",
];

/// Render the synthesized `.env` for a project with no template.
///
/// Directory values follow the configured input and output locations, so
/// the defaults produce `OUTPUT_DIR=out` and `INPUT_DIR=in`.
pub fn render_defaults(config: &BootstrapConfig) -> String {
    let output_dir = config.display_path(&config.output_dir);
    let input_dir = config.display_path(&config.input_dir);

    let sections: [(&str, Vec<(&str, &str)>); 5] = [
        ("OpenAI API Configuration", vec![(API_KEY, PLACEHOLDER_API_KEY)]),
        (
            "Application Configuration",
            vec![
                ("LOG_LEVEL", "INFO"),
                ("MAX_CONCURRENT_REQUESTS", "10"),
                ("REQUEST_TIMEOUT", "30"),
            ],
        ),
        ("Testing Configuration", vec![("MAX_SPEAKERS", "10")]),
        (
            "Sender Configuration",
            vec![
                ("SENDER_NAME", "DroneDeploy"),
                ("SENDER_TITLE", "AI Outreach Agent"),
            ],
        ),
        (
            "Directory Configuration",
            vec![
                ("OUTPUT_DIR", output_dir.as_str()),
                ("INPUT_DIR", input_dir.as_str()),
            ],
        ),
    ];

    let mut out = String::new();
    for (idx, (title, entries)) in sections.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&format!("# {}\n", title));
        for (key, value) in entries {
            out.push_str(&format!("{}={}\n", key, quote(value)));
        }
    }
    out
}

fn quote(value: &str) -> String {
    if value.contains(char::is_whitespace) || value.contains('#') {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// State of the API key after scaffolding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretState {
    /// A non-placeholder value is set
    Set,
    /// The placeholder marker is still present
    Placeholder,
    /// The key is absent or empty
    Missing,
}

/// What the scaffolded `.env` contains, for end-of-run reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileStatus {
    pub secret: SecretState,
    /// Known keys absent from the file
    pub missing_keys: Vec<String>,
    /// Parse error, if the file is not valid dotenv syntax
    pub parse_error: Option<String>,
}

impl EnvFileStatus {
    /// Inspect the file at `path`.
    ///
    /// A raw scan for [`PLACEHOLDER_API_KEY`] always runs, so the reminder
    /// fires even when the file does not parse.
    pub fn inspect(path: &NormalizedPath) -> Result<Self> {
        let raw = io::read_text(path)?;
        let has_placeholder = raw.contains(PLACEHOLDER_API_KEY);

        let parsed: std::result::Result<Vec<(String, String)>, dotenvy::Error> =
            dotenvy::from_read_iter(raw.as_bytes()).collect();

        let status = match parsed {
            Ok(pairs) => {
                let value = pairs
                    .iter()
                    .rev()
                    .find(|(k, _)| k == API_KEY)
                    .map(|(_, v)| v.trim());
                let secret = match value {
                    _ if has_placeholder => SecretState::Placeholder,
                    Some(v) if !v.is_empty() => SecretState::Set,
                    _ => SecretState::Missing,
                };
                let missing_keys = KNOWN_KEYS
                    .iter()
                    .filter(|key| !pairs.iter().any(|(k, _)| k == *key))
                    .map(|key| key.to_string())
                    .collect();
                Self {
                    secret,
                    missing_keys,
                    parse_error: None,
                }
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Could not parse env file");
                Self {
                    secret: if has_placeholder {
                        SecretState::Placeholder
                    } else {
                        SecretState::Set
                    },
                    missing_keys: Vec::new(),
                    parse_error: Some(e.to_string()),
                }
            }
        };
        Ok(status)
    }
}
