//! linkboard: a link-preview dashboard.
//!
//! Entry point: reads a newline-delimited URL list, runs the bookmark
//! pipeline, and writes the rendered HTML view. With `--interactive`, keeps
//! accepting search/sort/view/clear commands on the console.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use linkboard::app::App;
use linkboard::config::AppConfig;
use linkboard::types::view::{SortKey, ViewMode};

#[derive(Parser, Debug)]
#[command(
    name = "linkboard",
    version,
    about = "Fetches preview metadata for a list of URLs and renders it as searchable, sortable cards or a table"
)]
struct Cli {
    /// Newline-delimited URL list (overrides the config value)
    #[arg(long)]
    links: Option<String>,

    /// Output HTML file (overrides the config value)
    #[arg(long)]
    output: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start in the given view mode: card or table
    #[arg(long)]
    view: Option<String>,

    /// Sort key: title, description, or link
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,

    /// Initial search term
    #[arg(long)]
    search: Option<String>,

    /// Clear the persisted cache before running
    #[arg(long)]
    clear_cache: bool,

    /// Accept console commands after the initial render
    #[arg(long, short)]
    interactive: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(message) = run(cli).await {
        tracing::error!("{}", message);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config_path = cli.config.unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path)?;
    if let Some(links) = cli.links {
        config.links_path = links;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    let mut app = App::new(config)?;

    if let Some(mode) = cli.view.as_deref() {
        match ViewMode::parse(mode) {
            Some(mode) => app.view.set_view_mode(mode),
            None => return Err(format!("unknown view mode: {} (expected card or table)", mode)),
        }
    }
    match cli.sort.as_deref() {
        Some(key) => match SortKey::parse(key) {
            Some(key) => app.view.set_sort(key, !cli.desc),
            None => {
                return Err(format!(
                    "unknown sort key: {} (expected title, description, or link)",
                    key
                ))
            }
        },
        None if cli.desc => app.view.set_sort(SortKey::default(), false),
        None => {}
    }
    if let Some(term) = cli.search.as_deref() {
        app.view.set_search_term(term);
    }

    if cli.clear_cache {
        app.clear_cache().map_err(|e| e.to_string())?;
        tracing::info!("cleared the bookmark cache");
    }

    match app.load().await {
        Ok(count) => {
            app.write_output()?;
            println!("{} bookmarks -> {}", count, app.output_path());
        }
        Err(err) => {
            // A run-level failure replaces the whole surface with a single
            // error notice.
            app.write_error(&err.to_string())?;
            return Err(err.to_string());
        }
    }

    if cli.interactive {
        app.interactive().await?;
    }
    Ok(())
}
