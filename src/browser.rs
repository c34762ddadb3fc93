//! Browser control: the [`PageDriver`] seam and its CDP implementation.
//!
//! The pipeline never talks to chromiumoxide directly; every stage takes a
//! `&dyn PageDriver`. That keeps the UI-interaction contract narrow enough
//! to fake in tests and keeps all CDP plumbing in this one file.
//!
//! ## Attaching, not launching
//!
//! [`CdpDriver::connect`] attaches to an **already-running** Chromium via
//! its remote-debugging endpoint. The operator's existing session (cookies,
//! Zhihu login) is what makes the compose page usable; launching a fresh
//! browser would land on a login wall. Discovery goes through
//! `GET <cdp>/json/version`, which returns the WebSocket debugger URL that
//! chromiumoxide then connects to.
//!
//! ## Waits
//!
//! Element readiness is detected by polling for presence up to
//! `element_timeout_ms`, replacing the fixed sleeps the original script
//! used. A selector that never resolves becomes
//! [`PublishError::ElementNotFound`] naming the selector and the time
//! waited, which is the diagnostic that actually matters when one of the
//! external sites changes its DOM.

use crate::config::PublishConfig;
use crate::error::PublishError;
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Editing actions issued against the focused element.
///
/// These are the only keyboard interactions the pipeline needs; a typed
/// enum keeps fakes honest (no string chords to mistype).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Ctrl+A — select the editor's entire content.
    SelectAll,
    /// Delete — remove the current selection.
    DeleteSelection,
    /// Ctrl+V — paste the clipboard at the cursor.
    Paste,
}

/// Narrow driving interface over one browser page.
///
/// Implementations must be `Send + Sync`; the pipeline itself is strictly
/// sequential but the driver is shared behind an `Arc`.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate and block until the page reports a loaded state.
    async fn goto(&self, url: &str) -> Result<(), PublishError>;

    /// Poll until `selector` resolves to at least one element.
    async fn wait_for(&self, selector: &str) -> Result<(), PublishError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), PublishError>;

    /// Focus the first element matching `selector` and type `text` into it.
    async fn fill(&self, selector: &str, text: &str) -> Result<(), PublishError>;

    /// Issue an editing action against the focused element.
    async fn press(&self, action: EditAction) -> Result<(), PublishError>;

    /// Run a fire-and-forget script in the page (scroll nudges).
    async fn evaluate(&self, js: &str) -> Result<(), PublishError>;

    /// Set the file list of the first input matching `selector`.
    async fn set_input_files(&self, selector: &str, path: &Path) -> Result<(), PublishError>;

    /// Whether any element matching `scope` has visible text containing `text`.
    async fn text_exists(&self, scope: &str, text: &str) -> Result<bool, PublishError>;

    /// Click the first element matching `scope` whose visible text contains
    /// `text`. Returns whether such an element existed.
    async fn click_by_text(&self, scope: &str, text: &str) -> Result<bool, PublishError>;

    /// Click the first element matching `scope` whose trimmed visible text
    /// equals `text` exactly. Returns whether such an element existed.
    async fn click_by_exact_text(&self, scope: &str, text: &str) -> Result<bool, PublishError>;
}

/// [`PageDriver`] backed by a chromiumoxide CDP session.
pub struct CdpDriver {
    // Dropping the Browser tears down the CDP connection, so it lives as
    // long as the page it owns.
    _browser: Browser,
    page: Page,
    element_timeout: Duration,
    poll_interval: Duration,
}

impl CdpDriver {
    /// Attach to the browser named in `config` and open a fresh tab.
    pub async fn connect(config: &PublishConfig) -> Result<Self, PublishError> {
        let ws_url = discover_ws_url(&config.cdp_url).await?;
        debug!("Debugger WebSocket: {}", ws_url);

        let (browser, mut handler) =
            Browser::connect(&ws_url)
                .await
                .map_err(|e| PublishError::BrowserConnect {
                    endpoint: config.cdp_url.clone(),
                    detail: e.to_string(),
                })?;

        // The handler stream must be pumped for the connection to make
        // progress; it ends when the browser goes away.
        tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| PublishError::BrowserConnect {
                endpoint: config.cdp_url.clone(),
                detail: format!("failed to open page: {e}"),
            })?;

        info!("Attached to browser at {}", config.cdp_url);

        Ok(Self {
            _browser: browser,
            page,
            element_timeout: Duration::from_millis(config.element_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    async fn find(&self, selector: &str) -> Result<chromiumoxide::element::Element, PublishError> {
        self.wait_for_inner(selector).await?;
        self.page
            .find_element(selector)
            .await
            .map_err(|e| PublishError::Interaction {
                selector: selector.to_string(),
                detail: e.to_string(),
            })
    }

    async fn wait_for_inner(&self, selector: &str) -> Result<(), PublishError> {
        let deadline = Instant::now() + self.element_timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PublishError::ElementNotFound {
                    selector: selector.to_string(),
                    waited_ms: self.element_timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Dispatch a keydown/keyup pair, optionally carrying an editing command.
    ///
    /// Chromium executes editing commands ("selectAll", "paste", …) attached
    /// to the keydown against the focused element, which is more reliable
    /// over CDP than synthesising raw modifier sequences.
    async fn dispatch_key(
        &self,
        key: &str,
        code: &str,
        modifiers: i64,
        commands: Vec<String>,
    ) -> Result<(), PublishError> {
        let map_err = |e: chromiumoxide::error::CdpError| PublishError::Interaction {
            selector: format!("<key {key}>"),
            detail: e.to_string(),
        };

        let mut down = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::RawKeyDown)
            .key(key)
            .code(code)
            .modifiers(modifiers);
        if !commands.is_empty() {
            down = down.commands(commands);
        }
        let down = down.build().map_err(PublishError::Internal)?;
        self.page.execute(down).await.map_err(map_err)?;

        let up = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyUp)
            .key(key)
            .code(code)
            .modifiers(modifiers)
            .build()
            .map_err(PublishError::Internal)?;
        self.page.execute(up).await.map_err(map_err)?;
        Ok(())
    }

    async fn visible_texts(
        &self,
        scope: &str,
    ) -> Result<Vec<(chromiumoxide::element::Element, String)>, PublishError> {
        let elements =
            self.page
                .find_elements(scope)
                .await
                .map_err(|e| PublishError::Interaction {
                    selector: scope.to_string(),
                    detail: e.to_string(),
                })?;

        let mut out = Vec::with_capacity(elements.len());
        for el in elements {
            let text = el
                .inner_text()
                .await
                .map_err(|e| PublishError::Interaction {
                    selector: scope.to_string(),
                    detail: e.to_string(),
                })?
                .unwrap_or_default();
            out.push((el, text));
        }
        Ok(out)
    }
}

// CDP modifier bitmask: 2 = Ctrl.
const CTRL: i64 = 2;

#[async_trait]
impl PageDriver for CdpDriver {
    async fn goto(&self, url: &str) -> Result<(), PublishError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| PublishError::Navigation {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| PublishError::Navigation {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        debug!("Navigated to {}", url);
        Ok(())
    }

    async fn wait_for(&self, selector: &str) -> Result<(), PublishError> {
        self.wait_for_inner(selector).await
    }

    async fn click(&self, selector: &str) -> Result<(), PublishError> {
        let element = self.find(selector).await?;
        element.click().await.map_err(|e| PublishError::Interaction {
            selector: selector.to_string(),
            detail: e.to_string(),
        })?;
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), PublishError> {
        let element = self.find(selector).await?;
        let map_err = |e: chromiumoxide::error::CdpError| PublishError::Interaction {
            selector: selector.to_string(),
            detail: e.to_string(),
        };
        let element = element.click().await.map_err(map_err)?;
        element.type_str(text).await.map_err(map_err)?;
        Ok(())
    }

    async fn press(&self, action: EditAction) -> Result<(), PublishError> {
        match action {
            EditAction::SelectAll => {
                self.dispatch_key("a", "KeyA", CTRL, vec!["selectAll".to_string()])
                    .await
            }
            EditAction::DeleteSelection => {
                self.dispatch_key("Delete", "Delete", 0, vec!["delete".to_string()])
                    .await
            }
            EditAction::Paste => {
                self.dispatch_key("v", "KeyV", CTRL, vec!["paste".to_string()])
                    .await
            }
        }
    }

    async fn evaluate(&self, js: &str) -> Result<(), PublishError> {
        self.page
            .evaluate(js)
            .await
            .map_err(|e| PublishError::Internal(format!("evaluate failed: {e}")))?;
        Ok(())
    }

    async fn set_input_files(&self, selector: &str, path: &Path) -> Result<(), PublishError> {
        let element = self.find(selector).await?;
        let cmd = SetFileInputFilesParams::builder()
            .files(vec![path.display().to_string()])
            .backend_node_id(element.backend_node_id)
            .build()
            .map_err(PublishError::Internal)?;
        self.page
            .execute(cmd)
            .await
            .map_err(|e| PublishError::Interaction {
                selector: selector.to_string(),
                detail: e.to_string(),
            })?;
        Ok(())
    }

    async fn text_exists(&self, scope: &str, text: &str) -> Result<bool, PublishError> {
        Ok(self
            .visible_texts(scope)
            .await?
            .iter()
            .any(|(_, t)| t.contains(text)))
    }

    async fn click_by_text(&self, scope: &str, text: &str) -> Result<bool, PublishError> {
        for (el, t) in self.visible_texts(scope).await? {
            if t.contains(text) {
                el.click().await.map_err(|e| PublishError::Interaction {
                    selector: scope.to_string(),
                    detail: e.to_string(),
                })?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn click_by_exact_text(&self, scope: &str, text: &str) -> Result<bool, PublishError> {
        for (el, t) in self.visible_texts(scope).await? {
            if t.trim() == text {
                el.click().await.map_err(|e| PublishError::Interaction {
                    selector: scope.to_string(),
                    detail: e.to_string(),
                })?;
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Resolve the WebSocket debugger URL from the HTTP debugging endpoint.
async fn discover_ws_url(cdp_url: &str) -> Result<String, PublishError> {
    let version_url = format!("{}/json/version", cdp_url.trim_end_matches('/'));

    let response = reqwest::get(&version_url)
        .await
        .map_err(|e| PublishError::BrowserConnect {
            endpoint: cdp_url.to_string(),
            detail: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(PublishError::BrowserConnect {
            endpoint: cdp_url.to_string(),
            detail: format!("HTTP {} from {}", response.status(), version_url),
        });
    }

    let body: serde_json::Value =
        response
            .json()
            .await
            .map_err(|e| PublishError::BrowserConnect {
                endpoint: cdp_url.to_string(),
                detail: format!("invalid /json/version response: {e}"),
            })?;

    body.get("webSocketDebuggerUrl")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| PublishError::BrowserConnect {
            endpoint: cdp_url.to_string(),
            detail: "no webSocketDebuggerUrl in /json/version response".to_string(),
        })
}
