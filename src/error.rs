//! Error types for the md2zhihu library.
//!
//! Every error here is **fatal**: the pipeline is strictly sequential and
//! nothing is caught or retried, so the first failure aborts the remainder
//! of the run. Content already pasted and topics already attached stay in
//! the live browser session; the error only tells the operator where the
//! run stopped.
//!
//! One failure mode is deliberately *not* an error at the point where it is
//! detected: a topic with no exact autocomplete match surfaces first as
//! [`crate::pipeline::metadata::TopicMatch::NotFound`], structured data that
//! the metadata stage then converts into [`PublishError::TopicNotFound`].
//! That keeps "no match" distinguishable from "the search UI is broken"
//! while preserving the abort-on-first-miss policy.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2zhihu library.
#[derive(Debug, Error)]
pub enum PublishError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Markdown or cover file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The Markdown file is not valid UTF-8.
    #[error("File is not valid UTF-8: '{path}'")]
    NotUtf8 { path: PathBuf },

    /// No line starting with a heading marker was found in the document.
    ///
    /// The title fill stage cannot proceed without a title, so this is
    /// raised before any browser interaction starts.
    #[error("No title found in '{path}'\nThe first heading line (e.g. '# My Title') becomes the article title.")]
    MissingTitle { path: PathBuf },

    // ── Ambient resource errors ───────────────────────────────────────────
    /// System clipboard could not be opened or written.
    #[error("Clipboard access failed: {detail}")]
    Clipboard { detail: String },

    /// OS-level keyboard injection failed (Obsidian trigger path).
    #[error("Keyboard injection failed: {detail}\nOn Linux this requires an X11/uinput session; Wayland may need extra permissions.")]
    KeyInjection { detail: String },

    // ── Browser errors ────────────────────────────────────────────────────
    /// No reachable Chromium debugging endpoint.
    #[error(
        "Cannot attach to browser at '{endpoint}': {detail}\n\n\
Start Chromium with remote debugging enabled, e.g.:\n\
  chromium --remote-debugging-port=9222\n\
and log in to Zhihu in that browser before running md2zhihu."
    )]
    BrowserConnect { endpoint: String, detail: String },

    /// Page navigation failed or never reached a loaded state.
    #[error("Navigation to '{url}' failed: {detail}")]
    Navigation { url: String, detail: String },

    /// An expected UI control never appeared (DOM drift or slow load).
    #[error("Element '{selector}' not found after {waited_ms}ms\nThe external site's structure may have changed.")]
    ElementNotFound { selector: String, waited_ms: u64 },

    /// An element was found but interacting with it failed.
    #[error("Interaction with '{selector}' failed: {detail}")]
    Interaction { selector: String, detail: String },

    // ── Metadata errors ───────────────────────────────────────────────────
    /// Topic autocomplete produced no exact match for the requested topic.
    ///
    /// Later topics in the list are never attempted.
    #[error("No such topic: '{topic}'\nThe autocomplete panel showed no button whose text matches exactly.")]
    TopicNotFound { topic: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
