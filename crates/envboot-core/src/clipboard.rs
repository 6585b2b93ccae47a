//! Best-effort clipboard access

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("no clipboard tool available")]
    Unavailable,

    #[error("{tool} failed: {message}")]
    Failed { tool: String, message: String },
}

/// Something that can put text on the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard tools tried in order: macOS, Wayland, X11 (two), Windows.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Pipes text into the first clipboard tool found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        for (tool, args) in TOOLS {
            let child = Command::new(tool)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let mut child = match child {
                Ok(child) => child,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    debug!(tool, error = %e, "Clipboard tool failed to start");
                    continue;
                }
            };

            let failed = |message: String| ClipboardError::Failed {
                tool: tool.to_string(),
                message,
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(text.as_bytes())
                    .map_err(|e| failed(e.to_string()))?;
            }

            let status = child.wait().map_err(|e| failed(e.to_string()))?;
            if status.success() {
                debug!(tool, "Copied to clipboard");
                return Ok(());
            }
            // xclip exits non-zero without a display; try the next tool
            debug!(tool, code = ?status.code(), "Clipboard tool exited non-zero");
        }

        Err(ClipboardError::Unavailable)
    }
}
