//! CLI binary for md2zhihu.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PublishConfig` / `PublishRequest` and prints the report.

use anyhow::{Context, Result};
use clap::Parser;
use md2zhihu::{
    publish, ContentSource, PublishConfig, PublishRequest, PublishTrigger, MAX_TOPICS,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Dry run (default): everything except the final publish click
  md2zhihu --md post.md

  # With a cover image and topics (at most 3 are submitted)
  md2zhihu --md post.md --cover cover.png --topics 智能体 Manus MetaGPT

  # Actually click the publish button
  md2zhihu --md post.md --live

  # Let the focused Obsidian window export the content instead of reading a file
  md2zhihu --obsidian

  # Structured report on stdout
  md2zhihu --md post.md --json

SETUP:
  1. Start Chromium with remote debugging and log in to Zhihu there:
       chromium --remote-debugging-port=9222
  2. Run md2zhihu. It attaches to that browser; it never launches its own
     and never authenticates.

BEHAVIOUR NOTES:
  - The first heading line of the Markdown file becomes the article title;
    a file without one is rejected before the browser is touched.
  - The publish button is located in every run (so site drift is detected)
    but clicked only with --live.
  - A topic with no exact autocomplete match aborts the run and names the
    topic; topics after it are not attempted.
"#;

/// Publish a local Markdown file to a Zhihu column via a real browser.
#[derive(Parser, Debug)]
#[command(
    name = "md2zhihu",
    version,
    about = "Publish Markdown to a Zhihu column by driving a Chromium instance over CDP",
    long_about = "Publishes a local Markdown document to Zhihu's column editor by driving an \
already-running, logged-in Chromium over its remote-debugging endpoint: converts the Markdown \
via markdown.com.cn, fills the compose page, optionally uploads a cover and attaches topics, \
and locates the publish button (clicking it only with --live).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the Markdown file to publish.
    #[arg(long, env = "MD2ZHIHU_MD", required_unless_present = "obsidian")]
    md: Option<PathBuf>,

    /// Topic tags to attach (at most 3 are submitted; extras are dropped).
    #[arg(long, num_args = 1.., env = "MD2ZHIHU_TOPICS")]
    topics: Vec<String>,

    /// Path to a cover image, uploaded before any topics.
    #[arg(long, env = "MD2ZHIHU_COVER")]
    cover: Option<PathBuf>,

    /// Trigger the focused Obsidian window's publish plugin instead of
    /// reading --md.
    #[arg(long, conflicts_with = "md")]
    obsidian: bool,

    /// Actually click the publish button (default is a dry run).
    #[arg(long, env = "MD2ZHIHU_LIVE")]
    live: bool,

    /// Chromium remote-debugging endpoint to attach to.
    #[arg(long, env = "MD2ZHIHU_CDP_URL", default_value = "http://127.0.0.1:9222")]
    cdp_url: String,

    /// How long to wait for an expected page element, in milliseconds.
    #[arg(long, env = "MD2ZHIHU_ELEMENT_TIMEOUT", default_value_t = 10_000)]
    element_timeout: u64,

    /// Print the run report as JSON on stdout.
    #[arg(long, env = "MD2ZHIHU_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2ZHIHU_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2ZHIHU_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The per-stage info! lines are the pipeline's progress indicator, so
    // they stay on unless --quiet.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.topics.len() > MAX_TOPICS && !cli.quiet {
        eprintln!(
            "note: {} topics given; only the first {} will be submitted",
            cli.topics.len(),
            MAX_TOPICS
        );
    }

    // ── Build request and config ─────────────────────────────────────────
    let source = if cli.obsidian {
        ContentSource::ObsidianExport
    } else {
        // clap guarantees --md is present when --obsidian is absent.
        ContentSource::MarkdownFile(cli.md.clone().expect("--md required"))
    };

    let request = PublishRequest {
        source,
        cover: cli.cover.clone(),
        topics: cli.topics.clone(),
    };

    let config = PublishConfig::builder()
        .cdp_url(&cli.cdp_url)
        .live(cli.live)
        .element_timeout_ms(cli.element_timeout)
        .build()
        .context("Invalid configuration")?;

    // ── Run the pipeline ─────────────────────────────────────────────────
    let report = publish(&request, &config).await.context("Publish failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        match report.publish {
            PublishTrigger::Clicked => eprintln!("✔ published"),
            PublishTrigger::DryRun => eprintln!("✔ dry run complete (publish not clicked)"),
        }
        if let Some(ref title) = report.title {
            eprintln!("   title:  {title}");
        }
        if report.cover_uploaded {
            eprintln!("   cover:  uploaded");
        }
        if !report.topics_attached.is_empty() {
            eprintln!("   topics: {}", report.topics_attached.join(", "));
        }
        eprintln!("   took:   {}ms", report.total_duration_ms);
    }

    Ok(())
}
