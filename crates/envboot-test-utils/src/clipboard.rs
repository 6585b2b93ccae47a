//! [`RecordingClipboard`]: a clipboard fake that remembers what it was given.

use std::cell::RefCell;

use envboot_core::{ClipboardError, ClipboardWriter};

/// Clipboard that records writes, or fails every write when built with
/// [`RecordingClipboard::broken`].
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    writes: RefCell<Vec<String>>,
    broken: bool,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            writes: RefCell::new(Vec::new()),
            broken: true,
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable);
        }
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}
