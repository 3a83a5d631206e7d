//! Clipboard access
//!
//! Thin wrapper over the system clipboard. An absent or non-text clipboard
//! is a valid state, not an error.

use crate::error::{ClipError, ClipResult};
use tracing::debug;

/// Clipboard collaborator used by the main loop
pub trait ClipboardProvider {
    /// Current clipboard text, or None when the clipboard is empty or
    /// holds non-text data
    fn read(&mut self) -> Option<String>;

    /// Replace the clipboard contents
    fn write(&mut self, text: &str) -> ClipResult<()>;
}

/// System clipboard backed by arboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> ClipResult<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| ClipError::Clipboard(format!("failed to open clipboard: {e}")))?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read(&mut self) -> Option<String> {
        match self.inner.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("Clipboard has no text content: {}", e);
                None
            }
        }
    }

    fn write(&mut self, text: &str) -> ClipResult<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ClipError::Clipboard(format!("failed to write clipboard: {e}")))
    }
}
