//! Clipboard access behind a trait.
//!
//! The OS clipboard is the one shared mutable resource in the pipeline: the
//! content loader writes the raw Markdown to it, the converter's export
//! control rewrites it, and the compose stage pastes from it. Passing it as
//! an explicit parameter (rather than reaching for a global) clarifies that
//! ownership and lets tests substitute [`crate::config::PublishConfig::clipboard`]
//! with a fake.
//!
//! Nothing protects the clipboard from a concurrent process or the user
//! overwriting it mid-run; that race is inherited from the environment.

use crate::error::PublishError;
use std::sync::Mutex;

/// Read/write access to a text clipboard.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard content with `text`.
    fn set_text(&self, text: &str) -> Result<(), PublishError>;

    /// Read the current clipboard text.
    fn get_text(&self) -> Result<String, PublishError>;
}

/// The real OS clipboard, via `arboard`.
///
/// `arboard::Clipboard` is not `Sync`, so it sits behind a mutex; the
/// pipeline is single-threaded and never contends on it.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Open the system clipboard.
    pub fn new() -> Result<Self, PublishError> {
        let inner = arboard::Clipboard::new().map_err(|e| PublishError::Clipboard {
            detail: e.to_string(),
        })?;
        Ok(Self {
            inner: Mutex::new(inner),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), PublishError> {
        let mut guard = self.inner.lock().map_err(|_| PublishError::Clipboard {
            detail: "clipboard mutex poisoned".to_string(),
        })?;
        guard.set_text(text).map_err(|e| PublishError::Clipboard {
            detail: e.to_string(),
        })
    }

    fn get_text(&self) -> Result<String, PublishError> {
        let mut guard = self.inner.lock().map_err(|_| PublishError::Clipboard {
            detail: "clipboard mutex poisoned".to_string(),
        })?;
        guard.get_text().map_err(|e| PublishError::Clipboard {
            detail: e.to_string(),
        })
    }
}
