//! Final stage: the publish button.
//!
//! The button is always located — DOM drift should fail a dry run just as
//! loudly as a live one — but clicked only when the `live` config flag is
//! set. Dry run is the default.

use crate::browser::PageDriver;
use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::output::PublishTrigger;
use crate::selectors;
use tracing::info;

/// Locate the publish button and, in live mode, click it.
pub async fn trigger(
    driver: &dyn PageDriver,
    config: &PublishConfig,
) -> Result<PublishTrigger, PublishError> {
    if !driver
        .text_exists("button", selectors::PUBLISH_TEXT)
        .await?
    {
        return Err(PublishError::ElementNotFound {
            selector: format!("button:has-text(\"{}\")", selectors::PUBLISH_TEXT),
            waited_ms: 0,
        });
    }

    if config.live {
        driver
            .click_by_text("button", selectors::PUBLISH_TEXT)
            .await?;
        info!("Publish button clicked");
        Ok(PublishTrigger::Clicked)
    } else {
        info!("Dry run: publish button located but not clicked");
        Ok(PublishTrigger::DryRun)
    }
}
