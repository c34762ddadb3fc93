//! Stage 2: the Markdown-to-rich-text converter.
//!
//! Drives the markdown.com.cn editor: wait for the CodeMirror editor,
//! clear whatever it held, paste the clipboard content, force the lazy
//! preview to render by scrolling both ways, then click the
//! export-for-Zhihu control, which rewrites the clipboard with converted
//! rich content.
//!
//! Nothing verifies the export succeeded — the export script gives no
//! observable completion signal, so the compose stage assumes the clipboard
//! changed. This is inherited behaviour, bounded by `export_settle_ms`.

use crate::browser::{EditAction, PageDriver};
use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::pipeline::{force_scroll_passes, settle};
use crate::selectors;
use tracing::info;

/// Run the full converter-stage interaction.
pub async fn run(driver: &dyn PageDriver, config: &PublishConfig) -> Result<(), PublishError> {
    driver.goto(selectors::CONVERTER_URL).await?;
    driver.wait_for(selectors::CONVERTER_EDITOR_LINE).await?;
    info!("Converter page loaded");

    // Focus the editor and clear any prior content.
    driver.click(selectors::CONVERTER_EDITOR_LINE).await?;
    driver.press(EditAction::SelectAll).await?;
    driver.press(EditAction::DeleteSelection).await?;
    info!("Converter editor cleared");
    settle(config.clear_settle_ms).await;

    driver.press(EditAction::Paste).await?;
    info!("Markdown pasted into converter");

    // The preview renders lazily; scrolling forces the whole document
    // through it before export.
    force_scroll_passes(driver).await?;
    settle(config.render_settle_ms).await;

    driver.wait_for(selectors::CONVERTER_EXPORT_ZHIHU).await?;
    driver.click(selectors::CONVERTER_EXPORT_ZHIHU).await?;
    info!("Converter content exported for Zhihu");
    settle(config.export_settle_ms).await;

    Ok(())
}
