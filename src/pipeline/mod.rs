//! Pipeline stages for browser-driven publishing.
//!
//! Each submodule implements exactly one stage against the [`PageDriver`]
//! seam, so every stage is independently testable with a fake driver and
//! the orchestrator in [`crate::run`] stays a plain sequence of calls.
//!
//! ## Data Flow
//!
//! ```text
//! acquire ──▶ convert ──▶ compose ──▶ metadata ──▶ publish
//! (file/keys)  (md→rich)   (title+body) (cover+topics) (button)
//! ```
//!
//! 1. [`acquire`]  — read the Markdown file and copy it to the clipboard,
//!    or fire the Obsidian key chords instead
//! 2. [`convert`]  — drive the markdown.com.cn editor: clear, paste,
//!    force-render, export for Zhihu back onto the clipboard
//! 3. [`compose`]  — open the Zhihu write page, fill the title, paste the
//!    converted body
//! 4. [`metadata`] — optional cover upload and up-to-three topic tags
//! 5. [`publish`]  — locate the publish button; click only in live mode
//!
//! Control flow is strictly sequential; no stage starts before the prior
//! one's UI action completed, and the first error aborts the rest.

use crate::browser::PageDriver;

pub mod acquire;
pub mod compose;
pub mod convert;
pub mod metadata;
pub mod publish;

pub(crate) async fn settle(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// Scroll the page bottom-then-top-then-bottom via the driver.
pub(crate) async fn force_scroll_passes(
    driver: &dyn PageDriver,
) -> Result<(), crate::error::PublishError> {
    driver.evaluate(crate::selectors::SCROLL_TO_BOTTOM).await?;
    driver.evaluate(crate::selectors::SCROLL_TO_TOP).await?;
    driver.evaluate(crate::selectors::SCROLL_TO_BOTTOM).await?;
    Ok(())
}
