//! End-to-end pipeline tests against fake ambient resources.
//!
//! The browser page, clipboard, and keyboard are injected through
//! `PublishConfig`, so the whole pipeline runs here without a browser:
//! the fakes record every interaction and the assertions check the
//! pipeline's externally observable contract — what was driven, in what
//! order, and what was never attempted.

use async_trait::async_trait;
use md2zhihu::{
    publish, selectors, Clipboard, ContentSource, EditAction, KeyInjector, Modifier, PageDriver,
    PublishConfig, PublishError, PublishRequest, PublishTrigger,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// ── Fakes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Goto(String),
    WaitFor(String),
    Click(String),
    Fill(String, String),
    Press(EditAction),
    Evaluate(String),
    SetInputFiles(String, PathBuf),
    TextExists(String, String),
    ClickByText(String, String),
    ClickByExactText(String, String),
}

/// Records every driver call; topic searches match against `known_topics`.
#[derive(Default)]
struct FakeDriver {
    actions: Mutex<Vec<Action>>,
    known_topics: Vec<String>,
}

impl FakeDriver {
    fn with_topics(topics: &[&str]) -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
            known_topics: topics.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }

    fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    fn count(&self, pred: impl Fn(&Action) -> bool) -> usize {
        self.actions().iter().filter(|a| pred(a)).count()
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn goto(&self, url: &str) -> Result<(), PublishError> {
        self.record(Action::Goto(url.to_string()));
        Ok(())
    }

    async fn wait_for(&self, selector: &str) -> Result<(), PublishError> {
        self.record(Action::WaitFor(selector.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), PublishError> {
        self.record(Action::Click(selector.to_string()));
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), PublishError> {
        self.record(Action::Fill(selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn press(&self, action: EditAction) -> Result<(), PublishError> {
        self.record(Action::Press(action));
        Ok(())
    }

    async fn evaluate(&self, js: &str) -> Result<(), PublishError> {
        self.record(Action::Evaluate(js.to_string()));
        Ok(())
    }

    async fn set_input_files(&self, selector: &str, path: &Path) -> Result<(), PublishError> {
        self.record(Action::SetInputFiles(
            selector.to_string(),
            path.to_path_buf(),
        ));
        Ok(())
    }

    async fn text_exists(&self, scope: &str, text: &str) -> Result<bool, PublishError> {
        self.record(Action::TextExists(scope.to_string(), text.to_string()));
        Ok(true)
    }

    async fn click_by_text(&self, scope: &str, text: &str) -> Result<bool, PublishError> {
        self.record(Action::ClickByText(scope.to_string(), text.to_string()));
        Ok(true)
    }

    async fn click_by_exact_text(&self, scope: &str, text: &str) -> Result<bool, PublishError> {
        self.record(Action::ClickByExactText(
            scope.to_string(),
            text.to_string(),
        ));
        Ok(self.known_topics.iter().any(|t| t == text))
    }
}

#[derive(Default)]
struct FakeClipboard {
    texts: Mutex<Vec<String>>,
}

impl Clipboard for FakeClipboard {
    fn set_text(&self, text: &str) -> Result<(), PublishError> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn get_text(&self) -> Result<String, PublishError> {
        Ok(self
            .texts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeKeys {
    chords: Mutex<Vec<(Vec<Modifier>, char)>>,
}

impl KeyInjector for FakeKeys {
    fn chord(&self, modifiers: &[Modifier], key: char) -> Result<(), PublishError> {
        self.chords.lock().unwrap().push((modifiers.to_vec(), key));
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────

fn md_file(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "{content}").unwrap();
    f
}

/// Fast config with all fakes injected and every settle at zero.
fn fake_config(
    driver: Arc<FakeDriver>,
    clipboard: Arc<FakeClipboard>,
    keys: Arc<FakeKeys>,
) -> PublishConfig {
    let mut config = PublishConfig::builder()
        .driver(driver)
        .clipboard(clipboard)
        .keys(keys)
        .build()
        .unwrap();
    config.clear_settle_ms = 0;
    config.render_settle_ms = 0;
    config.export_settle_ms = 0;
    config.title_settle_ms = 0;
    config.body_settle_ms = 0;
    config.scroll_settle_ms = 0;
    config.upload_settle_ms = 0;
    config.topic_settle_ms = 0;
    config.obsidian_palette_delay_ms = 0;
    config
}

fn is_topic_attempt(a: &Action) -> bool {
    matches!(a, Action::ClickByExactText(scope, _) if scope == selectors::TOPIC_RESULT_BUTTONS)
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_dry_run_without_metadata() {
    let f = md_file("# My Title\nBody line one\nBody line two");
    let driver = Arc::new(FakeDriver::default());
    let clipboard = Arc::new(FakeClipboard::default());
    let config = fake_config(driver.clone(), clipboard.clone(), Arc::default());

    let report = publish(&PublishRequest::for_file(f.path()), &config)
        .await
        .unwrap();

    // Title extracted and filled.
    assert_eq!(report.title.as_deref(), Some("My Title"));
    assert!(driver.actions().contains(&Action::Fill(
        selectors::TITLE_INPUT.to_string(),
        "My Title".to_string()
    )));

    // Full file content on the clipboard.
    assert_eq!(
        clipboard.get_text().unwrap(),
        "# My Title\nBody line one\nBody line two"
    );

    // Converter-stage interactions happened, in order.
    let actions = driver.actions();
    let converter_goto = actions
        .iter()
        .position(|a| *a == Action::Goto(selectors::CONVERTER_URL.to_string()))
        .expect("converter page opened");
    let compose_goto = actions
        .iter()
        .position(|a| *a == Action::Goto(selectors::COMPOSE_URL.to_string()))
        .expect("compose page opened");
    assert!(converter_goto < compose_goto);
    assert!(actions.contains(&Action::Press(EditAction::SelectAll)));
    assert!(actions.contains(&Action::Press(EditAction::DeleteSelection)));
    assert_eq!(
        driver.count(|a| *a == Action::Press(EditAction::Paste)),
        2,
        "one paste in the converter, one in the compose editor"
    );
    assert!(actions.contains(&Action::Click(
        selectors::CONVERTER_EXPORT_ZHIHU.to_string()
    )));

    // Cover and topic stages never invoked.
    assert_eq!(driver.count(|a| matches!(a, Action::SetInputFiles(..))), 0);
    assert_eq!(driver.count(is_topic_attempt), 0);

    // Publish located but not clicked.
    assert_eq!(report.publish, PublishTrigger::DryRun);
    assert!(actions.contains(&Action::TextExists(
        "button".to_string(),
        selectors::PUBLISH_TEXT.to_string()
    )));
    assert_eq!(
        driver.count(|a| matches!(a, Action::ClickByText(_, t) if t == selectors::PUBLISH_TEXT)),
        0
    );
}

#[tokio::test]
async fn live_mode_clicks_the_publish_button() {
    let f = md_file("# Hello World\nbody");
    let driver = Arc::new(FakeDriver::default());
    let mut config = fake_config(driver.clone(), Arc::default(), Arc::default());
    config.live = true;

    let report = publish(&PublishRequest::for_file(f.path()), &config)
        .await
        .unwrap();

    assert_eq!(report.publish, PublishTrigger::Clicked);
    assert_eq!(
        driver.count(|a| matches!(a, Action::ClickByText(_, t) if t == selectors::PUBLISH_TEXT)),
        1
    );
}

#[tokio::test]
async fn at_most_three_topics_are_submitted() {
    let f = md_file("# Title\nbody");
    let driver = Arc::new(FakeDriver::with_topics(&["t1", "t2", "t3", "t4", "t5"]));
    let config = fake_config(driver.clone(), Arc::default(), Arc::default());

    let request = PublishRequest {
        topics: vec!["t1", "t2", "t3", "t4", "t5"]
            .into_iter()
            .map(String::from)
            .collect(),
        ..PublishRequest::for_file(f.path())
    };
    let report = publish(&request, &config).await.unwrap();

    assert_eq!(report.topics_attached, vec!["t1", "t2", "t3"]);
    assert_eq!(driver.count(is_topic_attempt), 3);
    // The fourth and fifth topics never reach the search input either.
    assert_eq!(
        driver.count(|a| matches!(a, Action::Fill(s, _) if s == selectors::TOPIC_SEARCH_INPUT)),
        3
    );
}

#[tokio::test]
async fn unmatched_topic_aborts_and_names_itself() {
    let f = md_file("# Title\nbody");
    let driver = Arc::new(FakeDriver::with_topics(&["rust", "tokio"]));
    let config = fake_config(driver.clone(), Arc::default(), Arc::default());

    let request = PublishRequest {
        topics: vec!["rust".into(), "no-such-topic".into(), "tokio".into()],
        ..PublishRequest::for_file(f.path())
    };
    let err = publish(&request, &config).await.unwrap_err();

    match err {
        PublishError::TopicNotFound { topic } => assert_eq!(topic, "no-such-topic"),
        other => panic!("expected TopicNotFound, got: {other}"),
    }

    // "rust" and the miss were attempted; "tokio" never was, and neither
    // was the publish trigger.
    assert_eq!(driver.count(is_topic_attempt), 2);
    assert_eq!(
        driver.count(|a| matches!(a, Action::TextExists(_, t) if t == selectors::PUBLISH_TEXT)),
        0
    );
}

#[tokio::test]
async fn cover_is_uploaded_before_topics() {
    let f = md_file("# Title\nbody");
    let cover = tempfile::NamedTempFile::new().unwrap();
    let driver = Arc::new(FakeDriver::with_topics(&["rust"]));
    let config = fake_config(driver.clone(), Arc::default(), Arc::default());

    let request = PublishRequest {
        cover: Some(cover.path().to_path_buf()),
        topics: vec!["rust".into()],
        ..PublishRequest::for_file(f.path())
    };
    let report = publish(&request, &config).await.unwrap();

    assert!(report.cover_uploaded);
    assert_eq!(report.topics_attached, vec!["rust"]);

    let actions = driver.actions();
    let upload = actions
        .iter()
        .position(|a| matches!(a, Action::SetInputFiles(..)))
        .expect("cover uploaded");
    let first_topic = actions
        .iter()
        .position(is_topic_attempt)
        .expect("topic attempted");
    assert!(upload < first_topic);
}

#[tokio::test]
async fn missing_cover_file_fails_the_run() {
    let f = md_file("# Title\nbody");
    let driver = Arc::new(FakeDriver::default());
    let config = fake_config(driver.clone(), Arc::default(), Arc::default());

    let request = PublishRequest {
        cover: Some(PathBuf::from("/no/such/cover.png")),
        ..PublishRequest::for_file(f.path())
    };
    let err = publish(&request, &config).await.unwrap_err();
    assert!(matches!(err, PublishError::FileNotFound { .. }));
}

#[tokio::test]
async fn obsidian_path_never_touches_file_or_clipboard() {
    let driver = Arc::new(FakeDriver::default());
    let clipboard = Arc::new(FakeClipboard::default());
    let keys = Arc::new(FakeKeys::default());
    let config = fake_config(driver.clone(), clipboard.clone(), keys.clone());

    let request = PublishRequest {
        source: ContentSource::ObsidianExport,
        cover: None,
        topics: Vec::new(),
    };
    let report = publish(&request, &config).await.unwrap();

    // No local title, so the title fill is skipped entirely.
    assert_eq!(report.title, None);
    assert_eq!(
        driver.count(|a| matches!(a, Action::Fill(s, _) if s == selectors::TITLE_INPUT)),
        0
    );

    // The clipboard was never written by us; the chords were fired.
    assert!(clipboard.texts.lock().unwrap().is_empty());
    assert_eq!(
        *keys.chords.lock().unwrap(),
        vec![
            (vec![Modifier::Control], 'p'),
            (vec![Modifier::Control, Modifier::Shift], 'u'),
        ]
    );

    // The browser pipeline still ran.
    assert!(driver
        .actions()
        .contains(&Action::Goto(selectors::CONVERTER_URL.to_string())));
}

#[tokio::test]
async fn file_without_heading_fails_before_any_browser_action() {
    let f = md_file("plain text\nno heading anywhere");
    let driver = Arc::new(FakeDriver::default());
    let config = fake_config(driver.clone(), Arc::default(), Arc::default());

    let err = publish(&PublishRequest::for_file(f.path()), &config)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::MissingTitle { .. }));
    assert!(driver.actions().is_empty());
}
