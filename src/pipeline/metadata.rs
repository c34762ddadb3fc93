//! Stage 5: cover image and topic tags.
//!
//! The platform caps topics at three per article; extras in the request are
//! dropped with a warning rather than silently (the original truncated
//! without a trace). Cover upload runs before topics because the compose
//! page only enables topic editing once a cover is set.

use crate::browser::PageDriver;
use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::pipeline::settle;
use crate::selectors;
use std::path::Path;
use tracing::{info, warn};

/// Maximum topics the platform accepts per article.
pub const MAX_TOPICS: usize = 3;

/// Outcome of one topic search against the autocomplete panel.
///
/// "No exact match" is data, not an exception: callers decide the policy.
/// [`attach_topics`] converts `NotFound` into
/// [`PublishError::TopicNotFound`], preserving abort-on-first-miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicMatch {
    /// A button with exactly the requested text was found and clicked.
    Selected,
    /// The panel appeared but held no exact-text match.
    NotFound,
}

/// Upload the cover image and wait out the upload.
///
/// The path is validated locally first so a typo fails with
/// [`PublishError::FileNotFound`] instead of a confusing in-page error.
/// The upload widget exposes no progress indicator, so completion is
/// approximated by `upload_settle_ms`.
pub async fn upload_cover(
    driver: &dyn PageDriver,
    path: &Path,
    config: &PublishConfig,
) -> Result<(), PublishError> {
    if !path.exists() {
        return Err(PublishError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    driver
        .set_input_files(selectors::COVER_FILE_INPUT, path)
        .await?;
    info!("Cover image uploaded: {}", path.display());
    settle(config.upload_settle_ms).await;
    Ok(())
}

/// Search the autocomplete for one topic and click its exact-text match.
pub async fn select_topic(
    driver: &dyn PageDriver,
    topic: &str,
    config: &PublishConfig,
) -> Result<TopicMatch, PublishError> {
    if !driver
        .click_by_text("button", selectors::ADD_TOPIC_TEXT)
        .await?
    {
        return Err(PublishError::ElementNotFound {
            selector: format!("button:has-text(\"{}\")", selectors::ADD_TOPIC_TEXT),
            waited_ms: 0,
        });
    }

    driver.fill(selectors::TOPIC_SEARCH_INPUT, topic).await?;

    // The panel slides out once the autocomplete request returns.
    driver.wait_for(selectors::TOPIC_RESULT_PANEL).await?;

    if driver
        .click_by_exact_text(selectors::TOPIC_RESULT_BUTTONS, topic)
        .await?
    {
        info!("Topic attached: {}", topic);
        settle(config.topic_settle_ms).await;
        Ok(TopicMatch::Selected)
    } else {
        Ok(TopicMatch::NotFound)
    }
}

/// Attach up to [`MAX_TOPICS`] topics, aborting on the first miss.
///
/// Returns the topics actually attached, in submission order. A miss
/// surfaces as [`PublishError::TopicNotFound`] naming the topic; later
/// topics in the list are never attempted.
pub async fn attach_topics(
    driver: &dyn PageDriver,
    topics: &[String],
    config: &PublishConfig,
) -> Result<Vec<String>, PublishError> {
    if topics.len() > MAX_TOPICS {
        warn!(
            "{} topics requested; only the first {} are submitted ({:?} dropped)",
            topics.len(),
            MAX_TOPICS,
            &topics[MAX_TOPICS..]
        );
    }

    let mut attached = Vec::new();
    for topic in topics.iter().take(MAX_TOPICS) {
        match select_topic(driver, topic, config).await? {
            TopicMatch::Selected => attached.push(topic.clone()),
            TopicMatch::NotFound => {
                return Err(PublishError::TopicNotFound {
                    topic: topic.clone(),
                });
            }
        }
    }
    Ok(attached)
}
