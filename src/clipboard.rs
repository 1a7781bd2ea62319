//! System clipboard access for copying record codes.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard is not available")]
    NotAvailable,
    #[error("Failed to write to clipboard: {0}")]
    SetFailed(String),
}

/// Destination for copied codes.
pub trait CopyTarget {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Whether `copy_text` blocks until another program replaces the copied
    /// text.
    fn holds_until_replaced(&self) -> bool {
        false
    }
}

pub struct ClipboardService {
    clipboard: Option<Clipboard>,
    hold_until_replaced: bool,
}

impl ClipboardService {
    pub fn new() -> Self {
        let clipboard = Clipboard::new().ok();
        Self {
            clipboard,
            hold_until_replaced: false,
        }
    }

    /// For processes that exit right after copying. X11 and Wayland drop the
    /// contents with their owner, so on Linux setting text waits until
    /// another program takes the clipboard over.
    pub fn holding() -> Self {
        Self {
            hold_until_replaced: cfg!(target_os = "linux"),
            ..Self::new()
        }
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or(ClipboardError::NotAvailable)?;

        #[cfg(target_os = "linux")]
        if self.hold_until_replaced {
            use arboard::SetExtLinux;
            return clipboard
                .set()
                .wait()
                .text(text.to_string())
                .map_err(|e| ClipboardError::SetFailed(e.to_string()));
        }

        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::SetFailed(e.to_string()))
    }
}

impl CopyTarget for ClipboardService {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set_text(text)
    }

    fn holds_until_replaced(&self) -> bool {
        self.hold_until_replaced
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::new()
    }
}
