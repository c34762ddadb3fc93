//! URLs, CSS selectors, and visible-text anchors for the two external sites.
//!
//! Centralising the external UI contract here serves two purposes:
//!
//! 1. **Single source of truth** — neither site is owned by this crate, and
//!    a structural change on either one silently breaks the corresponding
//!    stage. When that happens, the fix lives in exactly one file.
//!
//! 2. **Testability** — unit tests and the fake driver used in integration
//!    tests import the same constants the real pipeline uses, so a selector
//!    typo cannot hide behind a mock.

/// The markdown.com.cn rich-text converter.
pub const CONVERTER_URL: &str = "https://markdown.com.cn/editor/";

/// The Zhihu column composition page. Session cookies from the attached
/// browser context carry authentication; this crate performs none.
pub const COMPOSE_URL: &str = "https://zhuanlan.zhihu.com/write";

// ── Converter page ────────────────────────────────────────────────────────

/// First editor line of the converter's CodeMirror instance. Clicking it
/// focuses the editor so select-all / delete / paste land there.
pub const CONVERTER_EDITOR_LINE: &str = ".CodeMirror-line";

/// Sidebar control that re-encodes the editor content for Zhihu and places
/// it on the clipboard.
pub const CONVERTER_EXPORT_ZHIHU: &str = "#nice-sidebar-zhihu";

// ── Compose page ──────────────────────────────────────────────────────────

/// Title textarea, located by its placeholder text.
pub const TITLE_INPUT: &str = r#"textarea[placeholder="请输入标题（最多 100 个字）"]"#;

/// Root of the Draft.js rich-content editor.
pub const BODY_EDITOR: &str = ".DraftEditor-root";

/// File input nested under the labelled cover-upload affordance.
pub const COVER_FILE_INPUT: &str = r#"label[class*="UploadPicture-wrapper"] input[type="file"]"#;

/// Visible text of the "add topic" button.
pub const ADD_TOPIC_TEXT: &str = "添加话题";

/// Topic search input, located by placeholder substring.
pub const TOPIC_SEARCH_INPUT: &str = r#"input[placeholder*="搜索话题"]"#;

/// The autocomplete slide-out panel that appears once the topic search has
/// results. Waiting for this replaces the original fixed sleep.
pub const TOPIC_RESULT_PANEL: &str = "div.Popover-content";

/// Candidate buttons inside the autocomplete panel. A topic is attached by
/// clicking the button whose visible text equals the topic exactly.
pub const TOPIC_RESULT_BUTTONS: &str = "div.Popover-content button";

/// Visible text of the publish button.
pub const PUBLISH_TEXT: &str = "发布";

// ── In-page scripts ───────────────────────────────────────────────────────

/// Scroll to the top of the document. The converter lazily renders its
/// preview; scrolling both ways forces the full document through it.
pub const SCROLL_TO_TOP: &str = "window.scrollTo(0, 0)";

/// Scroll to the bottom of the document.
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight)";
