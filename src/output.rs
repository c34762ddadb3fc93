//! Request and report types for a publish run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the content to publish comes from.
///
/// The two paths are mutually exclusive per run and share no state: the
/// direct path reads a file and copies it to the clipboard itself; the
/// Obsidian path fires key chords at an external editor and trusts it to
/// produce the clipboard payload.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Read this Markdown file, extract its title, copy it to the clipboard.
    MarkdownFile(PathBuf),
    /// Trigger the focused Obsidian window's publish-to-clipboard plugin.
    ObsidianExport,
}

/// One publish request, consumed by [`crate::run::publish`].
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub source: ContentSource,
    /// Optional cover image, uploaded before any topics are attached.
    pub cover: Option<PathBuf>,
    /// Requested topics. At most three are submitted; extras are dropped
    /// with a warning.
    pub topics: Vec<String>,
}

impl PublishRequest {
    /// Request publishing a Markdown file with no cover and no topics.
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ContentSource::MarkdownFile(path.into()),
            cover: None,
            topics: Vec::new(),
        }
    }
}

/// What happened to the publish button at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishTrigger {
    /// Button located but not clicked (the default).
    DryRun,
    /// Button located and clicked (`live` config flag).
    Clicked,
}

/// Structured summary of a completed run.
///
/// A failed run produces no report; whatever the pipeline changed in the
/// live browser session before the failure is left in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReport {
    /// Title extracted from the document. `None` on the Obsidian path,
    /// where the title is owned by the external plugin.
    pub title: Option<String>,
    /// Topics actually attached, in submission order.
    pub topics_attached: Vec<String>,
    /// Whether a cover image was uploaded.
    pub cover_uploaded: bool,
    /// Publish-button outcome.
    pub publish: PublishTrigger,
    /// Wall-clock duration of the whole run.
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serialises_trigger_as_snake_case() {
        let report = PublishReport {
            title: Some("My Title".into()),
            topics_attached: vec![],
            cover_uploaded: false,
            publish: PublishTrigger::DryRun,
            total_duration_ms: 42,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"dry_run\""), "got: {json}");
    }

    #[test]
    fn for_file_has_no_metadata() {
        let req = PublishRequest::for_file("/tmp/post.md");
        assert!(req.cover.is_none());
        assert!(req.topics.is_empty());
    }
}
