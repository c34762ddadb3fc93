//! Configuration for a publish run.
//!
//! All behaviour is controlled through [`PublishConfig`], built via its
//! [`PublishConfigBuilder`]. Keeping every knob in one struct makes it easy
//! to share a config across a run, log it, and diff two runs to understand
//! why their behaviour differed.
//!
//! # Design choice: injection slots over globals
//! The clipboard, the keyboard, and the browser page are ambient OS
//! resources the original script reached for globally. Here they are
//! explicit `Option<Arc<dyn …>>` fields: `None` means "use the real one",
//! `Some` lets tests (or embedders) substitute a fake without touching any
//! pipeline code.

use crate::browser::PageDriver;
use crate::clipboard::Clipboard;
use crate::error::PublishError;
use crate::keys::KeyInjector;
use std::fmt;
use std::sync::Arc;

/// Configuration for publishing a document.
///
/// Built via [`PublishConfig::builder()`] or using
/// [`PublishConfig::default()`].
///
/// # Example
/// ```rust
/// use md2zhihu::PublishConfig;
///
/// let config = PublishConfig::builder()
///     .cdp_url("http://127.0.0.1:9222")
///     .live(false)
///     .element_timeout_ms(15_000)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct PublishConfig {
    /// HTTP address of the Chromium remote-debugging endpoint.
    /// Default: `http://127.0.0.1:9222`.
    ///
    /// The browser must already be running with
    /// `--remote-debugging-port=9222` and hold an authenticated Zhihu
    /// session; this crate attaches to it rather than launching its own.
    pub cdp_url: String,

    /// Actually click the publish button. Default: `false` (dry run).
    ///
    /// In dry-run mode the button is located (so DOM drift is still
    /// detected) but never clicked, and the report records
    /// [`crate::output::PublishTrigger::DryRun`]. The source this crate
    /// derives from shipped with the click commented out; making the choice
    /// an explicit flag removes the ambiguity.
    pub live: bool,

    /// How long to wait for an expected element to appear. Default: 10 000 ms.
    ///
    /// Element readiness is detected by polling for presence rather than by
    /// fixed sleeps, so this is an upper bound, not a constant cost. Raise
    /// it on slow networks; a miss surfaces as
    /// [`PublishError::ElementNotFound`] naming the selector.
    pub element_timeout_ms: u64,

    /// Polling interval while waiting for an element. Default: 100 ms.
    pub poll_interval_ms: u64,

    /// Pause between clearing the converter editor and pasting. Default: 1 000 ms.
    ///
    /// CodeMirror rebuilds its DOM after a select-all + delete with no
    /// observable completion signal, so a short settle remains the only
    /// option here.
    pub clear_settle_ms: u64,

    /// Pause after the scroll passes that force the converter's lazy
    /// preview rendering. Default: 1 000 ms.
    pub render_settle_ms: u64,

    /// Pause after clicking the export control, giving the in-page script
    /// time to rewrite the clipboard. Default: 2 000 ms.
    ///
    /// There is no way to observe the export finishing; the next stage
    /// assumes the clipboard now holds the converted content.
    pub export_settle_ms: u64,

    /// Pause after filling the title, allowing client-side validation.
    /// Default: 2 000 ms.
    pub title_settle_ms: u64,

    /// Pause after pasting the body into the compose editor. Default: 2 000 ms.
    pub body_settle_ms: u64,

    /// Pause after scrolling the compose page to the bottom before the
    /// metadata stage. Default: 2 000 ms.
    pub scroll_settle_ms: u64,

    /// Pause after handing the cover image to the file input. Default: 3 000 ms.
    ///
    /// The upload widget exposes no progress indicator to poll.
    pub upload_settle_ms: u64,

    /// Pause after selecting a topic from the autocomplete panel, before
    /// the next topic's "add" button is clicked. Default: 1 000 ms.
    pub topic_settle_ms: u64,

    /// Pause between the command-palette chord and the plugin chord on the
    /// Obsidian trigger path. Default: 2 000 ms.
    pub obsidian_palette_delay_ms: u64,

    /// Pre-attached page driver. Takes precedence over `cdp_url`.
    pub driver: Option<Arc<dyn PageDriver>>,

    /// Clipboard override. `None` uses the system clipboard.
    pub clipboard: Option<Arc<dyn Clipboard>>,

    /// Keyboard-injection override. `None` uses the OS-level injector.
    pub keys: Option<Arc<dyn KeyInjector>>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            cdp_url: "http://127.0.0.1:9222".to_string(),
            live: false,
            element_timeout_ms: 10_000,
            poll_interval_ms: 100,
            clear_settle_ms: 1_000,
            render_settle_ms: 1_000,
            export_settle_ms: 2_000,
            title_settle_ms: 2_000,
            body_settle_ms: 2_000,
            scroll_settle_ms: 2_000,
            upload_settle_ms: 3_000,
            topic_settle_ms: 1_000,
            obsidian_palette_delay_ms: 2_000,
            driver: None,
            clipboard: None,
            keys: None,
        }
    }
}

impl fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishConfig")
            .field("cdp_url", &self.cdp_url)
            .field("live", &self.live)
            .field("element_timeout_ms", &self.element_timeout_ms)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("clear_settle_ms", &self.clear_settle_ms)
            .field("render_settle_ms", &self.render_settle_ms)
            .field("export_settle_ms", &self.export_settle_ms)
            .field("title_settle_ms", &self.title_settle_ms)
            .field("body_settle_ms", &self.body_settle_ms)
            .field("scroll_settle_ms", &self.scroll_settle_ms)
            .field("upload_settle_ms", &self.upload_settle_ms)
            .field("topic_settle_ms", &self.topic_settle_ms)
            .field("obsidian_palette_delay_ms", &self.obsidian_palette_delay_ms)
            .field("driver", &self.driver.as_ref().map(|_| "<dyn PageDriver>"))
            .field("clipboard", &self.clipboard.as_ref().map(|_| "<dyn Clipboard>"))
            .field("keys", &self.keys.as_ref().map(|_| "<dyn KeyInjector>"))
            .finish()
    }
}

impl PublishConfig {
    /// Create a new builder for `PublishConfig`.
    pub fn builder() -> PublishConfigBuilder {
        PublishConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PublishConfig`].
#[derive(Debug)]
pub struct PublishConfigBuilder {
    config: PublishConfig,
}

impl PublishConfigBuilder {
    pub fn cdp_url(mut self, url: impl Into<String>) -> Self {
        self.config.cdp_url = url.into();
        self
    }

    pub fn live(mut self, v: bool) -> Self {
        self.config.live = v;
        self
    }

    pub fn element_timeout_ms(mut self, ms: u64) -> Self {
        self.config.element_timeout_ms = ms;
        self
    }

    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms.max(1);
        self
    }

    pub fn clear_settle_ms(mut self, ms: u64) -> Self {
        self.config.clear_settle_ms = ms;
        self
    }

    pub fn render_settle_ms(mut self, ms: u64) -> Self {
        self.config.render_settle_ms = ms;
        self
    }

    pub fn export_settle_ms(mut self, ms: u64) -> Self {
        self.config.export_settle_ms = ms;
        self
    }

    pub fn title_settle_ms(mut self, ms: u64) -> Self {
        self.config.title_settle_ms = ms;
        self
    }

    pub fn body_settle_ms(mut self, ms: u64) -> Self {
        self.config.body_settle_ms = ms;
        self
    }

    pub fn scroll_settle_ms(mut self, ms: u64) -> Self {
        self.config.scroll_settle_ms = ms;
        self
    }

    pub fn upload_settle_ms(mut self, ms: u64) -> Self {
        self.config.upload_settle_ms = ms;
        self
    }

    pub fn topic_settle_ms(mut self, ms: u64) -> Self {
        self.config.topic_settle_ms = ms;
        self
    }

    pub fn obsidian_palette_delay_ms(mut self, ms: u64) -> Self {
        self.config.obsidian_palette_delay_ms = ms;
        self
    }

    pub fn driver(mut self, driver: Arc<dyn PageDriver>) -> Self {
        self.config.driver = Some(driver);
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.config.clipboard = Some(clipboard);
        self
    }

    pub fn keys(mut self, keys: Arc<dyn KeyInjector>) -> Self {
        self.config.keys = Some(keys);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PublishConfig, PublishError> {
        let c = &self.config;
        if c.cdp_url.is_empty() {
            return Err(PublishError::InvalidConfig(
                "cdp_url must not be empty".into(),
            ));
        }
        if c.poll_interval_ms == 0 {
            return Err(PublishError::InvalidConfig(
                "poll_interval_ms must be ≥ 1".into(),
            ));
        }
        if c.element_timeout_ms < c.poll_interval_ms {
            return Err(PublishError::InvalidConfig(format!(
                "element_timeout_ms ({}) must be ≥ poll_interval_ms ({})",
                c.element_timeout_ms, c.poll_interval_ms
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dry_run() {
        let c = PublishConfig::default();
        assert!(!c.live);
        assert_eq!(c.cdp_url, "http://127.0.0.1:9222");
    }

    #[test]
    fn builder_rejects_timeout_below_poll_interval() {
        let err = PublishConfig::builder()
            .element_timeout_ms(50)
            .poll_interval_ms(100)
            .build()
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_empty_cdp_url() {
        let err = PublishConfig::builder().cdp_url("").build().unwrap_err();
        assert!(matches!(err, PublishError::InvalidConfig(_)));
    }

    #[test]
    fn debug_hides_injected_objects() {
        let dbg = format!("{:?}", PublishConfig::default());
        assert!(dbg.contains("driver: None"));
    }
}
