//! The publish orchestrator: one request in, one report out.
//!
//! This is the analogue of a conversion entry point: it resolves the
//! ambient resources (clipboard, keyboard, browser page), then runs the
//! five stages strictly sequentially. There is no retry and nothing is
//! caught: the first error aborts the remainder of the run and whatever the
//! pipeline already did in the live browser session stays there. The
//! per-stage `info!` lines are the run's only progress surface.

use crate::browser::{CdpDriver, PageDriver};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::keys::{KeyInjector, SystemKeys};
use crate::output::{ContentSource, PublishReport, PublishRequest};
use crate::pipeline::{acquire, compose, convert, metadata, publish as publish_stage, settle};
use crate::selectors;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Publish one document according to `request` and `config`.
///
/// # Errors
/// Returns the first [`PublishError`] any stage produces. Errors are never
/// partial-success values: content and topics already placed in the browser
/// session are not rolled back or reported.
pub async fn publish(
    request: &PublishRequest,
    config: &PublishConfig,
) -> Result<PublishReport, PublishError> {
    let start = Instant::now();

    // ── Stage 1: acquire content ─────────────────────────────────────────
    // Runs before the browser is touched so input errors fail fast.
    let title = match &request.source {
        ContentSource::MarkdownFile(path) => {
            let clipboard = resolve_clipboard(config)?;
            let document = acquire::load_and_copy(path, clipboard.as_ref())?;
            document.title
        }
        ContentSource::ObsidianExport => {
            let keys = resolve_keys(config)?;
            acquire::trigger_obsidian_export(keys.as_ref(), config).await?;
            None
        }
    };

    let driver = resolve_driver(config).await?;
    let driver = driver.as_ref();

    // ── Stage 2: convert ─────────────────────────────────────────────────
    convert::run(driver, config).await?;

    // ── Stages 3 & 4: navigate and fill ──────────────────────────────────
    compose::open_write_page(driver, config).await?;
    match &title {
        Some(t) => compose::fill_title(driver, t, config).await?,
        // Obsidian path: the external plugin owns the title.
        None => warn!("No local title available; title fill skipped"),
    }
    compose::paste_body(driver, config).await?;

    // The metadata affordances live at the bottom of the compose page.
    driver.evaluate(selectors::SCROLL_TO_BOTTOM).await?;
    settle(config.scroll_settle_ms).await;

    // ── Stage 5: metadata ────────────────────────────────────────────────
    let cover_uploaded = match &request.cover {
        Some(cover) => {
            metadata::upload_cover(driver, cover, config).await?;
            true
        }
        None => false,
    };

    let topics_attached = if request.topics.is_empty() {
        Vec::new()
    } else {
        metadata::attach_topics(driver, &request.topics, config).await?
    };

    // ── Publish trigger ──────────────────────────────────────────────────
    let trigger = publish_stage::trigger(driver, config).await?;

    let report = PublishReport {
        title,
        topics_attached,
        cover_uploaded,
        publish: trigger,
        total_duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Run complete in {}ms ({:?})",
        report.total_duration_ms, report.publish
    );
    Ok(report)
}

// ── Resource resolution ───────────────────────────────────────────────────
//
// Each resolver prefers the injected override from the config (tests,
// embedders) and falls back to the real OS/browser resource.

fn resolve_clipboard(config: &PublishConfig) -> Result<Arc<dyn Clipboard>, PublishError> {
    if let Some(ref clipboard) = config.clipboard {
        return Ok(Arc::clone(clipboard));
    }
    Ok(Arc::new(SystemClipboard::new()?))
}

fn resolve_keys(config: &PublishConfig) -> Result<Arc<dyn KeyInjector>, PublishError> {
    if let Some(ref keys) = config.keys {
        return Ok(Arc::clone(keys));
    }
    Ok(Arc::new(SystemKeys::new()?))
}

async fn resolve_driver(config: &PublishConfig) -> Result<Arc<dyn PageDriver>, PublishError> {
    if let Some(ref driver) = config.driver {
        return Ok(Arc::clone(driver));
    }
    Ok(Arc::new(CdpDriver::connect(config).await?))
}
