//! The source document: path, raw text, extracted title.
//!
//! A [`Document`] is created once from disk at the start of a run, read-only
//! afterwards, and discarded at process exit. The only derived field is the
//! title: the content of the first line whose trimmed form starts with a
//! heading marker, with the `#` markers and surrounding whitespace stripped.

use crate::clipboard::Clipboard;
use crate::error::PublishError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A Markdown document loaded from disk.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the document came from.
    pub path: PathBuf,
    /// Full raw text, exactly as read.
    pub content: String,
    /// First heading line with markers stripped, if any line had one.
    pub title: Option<String>,
}

impl Document {
    /// Read a Markdown file as UTF-8 and extract its title.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PublishError> {
        let path = path.as_ref().to_path_buf();

        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(PublishError::PermissionDenied { path });
            }
            Err(_) => {
                return Err(PublishError::FileNotFound { path });
            }
        };

        let content =
            String::from_utf8(bytes).map_err(|_| PublishError::NotUtf8 { path: path.clone() })?;

        let title = extract_title(&content);
        debug!(
            "Loaded {} ({} bytes, title: {:?})",
            path.display(),
            content.len(),
            title
        );

        Ok(Self {
            path,
            content,
            title,
        })
    }

    /// Place the raw document text on the clipboard for the converter stage.
    pub fn copy_to_clipboard(&self, clipboard: &dyn Clipboard) -> Result<(), PublishError> {
        clipboard.set_text(&self.content)?;
        info!("Markdown content copied to clipboard");
        Ok(())
    }
}

/// Scan lines in order and return the content of the first heading line.
///
/// A heading line is one whose trimmed form starts with `#`. Both leading
/// and trailing marker characters are stripped (`# Title #` → `Title`),
/// matching the original `strip('#').strip()` behaviour.
fn extract_title(content: &str) -> Option<String> {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            let title = trimmed.trim_matches('#').trim();
            return Some(title.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn first_heading_becomes_title() {
        assert_eq!(
            extract_title("# Hello World\nbody"),
            Some("Hello World".to_string())
        );
    }

    #[test]
    fn no_heading_yields_no_title() {
        assert_eq!(extract_title("just text\nmore text"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn heading_may_appear_after_plain_lines() {
        let md = "preamble\n\n## Section Title\n# Later Top Heading";
        assert_eq!(extract_title(md), Some("Section Title".to_string()));
    }

    #[test]
    fn markers_and_whitespace_are_stripped() {
        assert_eq!(extract_title("   ###  Spaced  "), Some("Spaced".to_string()));
        assert_eq!(extract_title("# Closed #"), Some("Closed".to_string()));
    }

    #[test]
    fn load_reads_content_and_title() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "# My Title\nBody line one\nBody line two").unwrap();

        let doc = Document::load(f.path()).unwrap();
        assert_eq!(doc.title.as_deref(), Some("My Title"));
        assert!(doc.content.ends_with("Body line two"));
    }

    #[test]
    fn load_missing_file_is_file_not_found() {
        let err = Document::load("/no/such/file.md").unwrap_err();
        assert!(matches!(err, PublishError::FileNotFound { .. }));
    }

    #[test]
    fn load_rejects_invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0xff, 0xfe, 0x23]).unwrap();

        let err = Document::load(f.path()).unwrap_err();
        assert!(matches!(err, PublishError::NotUtf8 { .. }));
    }
}
