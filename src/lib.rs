//! # md2zhihu
//!
//! Publish a local Markdown document to a Zhihu column by driving an
//! already-running Chromium instance over its remote-debugging (CDP)
//! endpoint.
//!
//! ## Why drive a browser?
//!
//! Zhihu's column editor accepts rich content, not Markdown, and the
//! conversion that looks right in its Draft.js editor is the one performed
//! by the markdown.com.cn converter's "copy for Zhihu" export. Driving the
//! operator's real, logged-in browser reuses both that conversion and the
//! existing session — no API tokens, no re-implementation of either site.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown file (or Obsidian export)
//!  │
//!  ├─ 1. Acquire   read file, extract title, copy raw text to clipboard
//!  ├─ 2. Convert   markdown.com.cn: clear, paste, render, export for Zhihu
//!  ├─ 3. Navigate  zhuanlan.zhihu.com/write (existing session)
//!  ├─ 4. Fill      title into its textarea, converted body pasted
//!  ├─ 5. Metadata  optional cover image + up to three topic tags
//!  └─ 6. Publish   button located; clicked only with `live` set (dry run default)
//! ```
//!
//! The pipeline is strictly sequential, single-threaded, and unrecoverable:
//! the first failure aborts the rest of the run, leaving any content
//! already placed in the browser session as-is.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2zhihu::{publish, PublishConfig, PublishRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Chromium must already be running with --remote-debugging-port=9222
//!     // and hold a logged-in Zhihu session.
//!     let config = PublishConfig::default(); // dry run by default
//!     let report = publish(&PublishRequest::for_file("post.md"), &config).await?;
//!     eprintln!("published? {:?} (title: {:?})", report.publish, report.title);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2zhihu` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2zhihu = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod browser;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod error;
pub mod keys;
pub mod output;
pub mod pipeline;
pub mod run;
pub mod selectors;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use browser::{CdpDriver, EditAction, PageDriver};
pub use clipboard::{Clipboard, SystemClipboard};
pub use config::{PublishConfig, PublishConfigBuilder};
pub use document::Document;
pub use error::PublishError;
pub use keys::{KeyInjector, Modifier, SystemKeys};
pub use output::{ContentSource, PublishReport, PublishRequest, PublishTrigger};
pub use pipeline::metadata::{TopicMatch, MAX_TOPICS};
pub use run::publish;
