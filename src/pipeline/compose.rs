//! Stages 3 and 4: publisher navigation and content fill.
//!
//! Navigation reuses the attached browser context, so the operator's
//! authenticated Zhihu session carries over; this crate performs no
//! authentication of its own and lands on a login wall if none exists.

use crate::browser::{EditAction, PageDriver};
use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::pipeline::settle;
use crate::selectors;
use tracing::info;

/// Navigate to the article-composition page and wait for its title input.
pub async fn open_write_page(
    driver: &dyn PageDriver,
    _config: &PublishConfig,
) -> Result<(), PublishError> {
    driver.goto(selectors::COMPOSE_URL).await?;
    driver.wait_for(selectors::TITLE_INPUT).await?;
    info!("Compose page loaded");
    Ok(())
}

/// Fill the title field, then pause for client-side validation.
pub async fn fill_title(
    driver: &dyn PageDriver,
    title: &str,
    config: &PublishConfig,
) -> Result<(), PublishError> {
    driver.fill(selectors::TITLE_INPUT, title).await?;
    info!("Title filled: {}", title);
    settle(config.title_settle_ms).await;
    Ok(())
}

/// Focus the rich-content editor and paste the converted body.
///
/// No confirmation that the pasted content matches the source is possible;
/// the clipboard is trusted to hold the converter stage's export.
pub async fn paste_body(
    driver: &dyn PageDriver,
    config: &PublishConfig,
) -> Result<(), PublishError> {
    driver.wait_for(selectors::BODY_EDITOR).await?;
    driver.click(selectors::BODY_EDITOR).await?;
    driver.press(EditAction::Paste).await?;
    info!("Body content pasted");
    settle(config.body_settle_ms).await;
    Ok(())
}
