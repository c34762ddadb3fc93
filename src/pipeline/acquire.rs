//! Stage 1: content acquisition.
//!
//! Two mutually exclusive paths produce the clipboard payload the converter
//! stage consumes:
//!
//! * **Direct** — read the Markdown file, extract the title, copy the raw
//!   text to the clipboard. This is the default and the only path that
//!   yields a [`Document`].
//! * **Obsidian** — fire Ctrl+P (command palette) and, after a pause,
//!   Ctrl+Shift+U (the "Image Upload Toolkit: publish page" shortcut) at
//!   the focused Obsidian window and trust its plugin to populate the
//!   clipboard. No title is known on this path, and nothing verifies the
//!   plugin actually ran.

use crate::clipboard::Clipboard;
use crate::config::PublishConfig;
use crate::document::Document;
use crate::error::PublishError;
use crate::keys::{KeyInjector, Modifier};
use crate::pipeline::settle;
use std::path::Path;
use tracing::info;

/// Load the document, require a title, and copy the raw text to the
/// clipboard.
///
/// The missing-title case is decided here, before any browser interaction:
/// the title fill stage has nothing sensible to do with an absent title, so
/// the run fails fast with [`PublishError::MissingTitle`].
pub fn load_and_copy(
    path: &Path,
    clipboard: &dyn Clipboard,
) -> Result<Document, PublishError> {
    let document = Document::load(path)?;
    if document.title.is_none() {
        return Err(PublishError::MissingTitle {
            path: document.path.clone(),
        });
    }
    document.copy_to_clipboard(clipboard)?;
    Ok(document)
}

/// Trigger the external Obsidian plugin's publish-to-clipboard export.
pub async fn trigger_obsidian_export(
    keys: &dyn KeyInjector,
    config: &PublishConfig,
) -> Result<(), PublishError> {
    info!("Obsidian path: opening command palette (Ctrl+P)");
    keys.chord(&[Modifier::Control], 'p')?;

    // The palette needs a beat to open before the plugin chord lands.
    settle(config.obsidian_palette_delay_ms).await;

    info!("Obsidian path: triggering publish shortcut (Ctrl+Shift+U)");
    keys.chord(&[Modifier::Control, Modifier::Shift], 'u')?;
    Ok(())
}
