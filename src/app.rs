//! App Core for linkboard.
//!
//! Central struct wiring the storage, cache, fetcher, pipeline, and view,
//! plus the batch run and the interactive console loop.

use std::fs;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::AppConfig;
use crate::managers::bookmark_pipeline::BookmarkPipeline;
use crate::managers::collection_view::CollectionView;
use crate::services::cache_store::CacheStore;
use crate::services::html_renderer;
use crate::services::page_fetcher::PageFetcher;
use crate::services::storage::{JsonFileStore, KeyValueStore};
use crate::types::bookmark::Bookmark;
use crate::types::errors::{CacheError, PipelineError};
use crate::types::view::SortKey;

/// Central application struct holding all collaborators and the current
/// run's bookmark collection.
pub struct App {
    config: AppConfig,
    cache: CacheStore,
    pipeline: BookmarkPipeline,
    pub view: CollectionView,
    bookmarks: Vec<Bookmark>,
}

impl App {
    /// Creates the app: one shared key-value store backs both the bookmark
    /// cache and the persisted view mode.
    pub fn new(config: AppConfig) -> Result<Self, String> {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(config.storage_file()));
        let fetcher = PageFetcher::new(config.fetch_timeout_ms, &config.user_agent)
            .map_err(|e| format!("Fetcher init failed: {}", e))?;
        let cache = CacheStore::new(Arc::clone(&store), config.cache_expiry_ms);
        let pipeline = BookmarkPipeline::new(Arc::new(fetcher), cache.clone());
        let view = CollectionView::new(store, config.debounce_ms);

        Ok(Self {
            config,
            cache,
            pipeline,
            view,
            bookmarks: Vec::new(),
        })
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn output_path(&self) -> &str {
        &self.config.output_path
    }

    /// Removes the persisted cache collection. The next load refetches
    /// everything.
    pub fn clear_cache(&self) -> Result<(), CacheError> {
        self.cache.clear()
    }

    /// Reads the links file and runs the pipeline. Returns the number of
    /// bookmarks produced.
    pub async fn load(&mut self) -> Result<usize, PipelineError> {
        let text = tokio::fs::read_to_string(&self.config.links_path)
            .await
            .map_err(|e| {
                PipelineError::ListUnavailable(format!("{}: {}", self.config.links_path, e))
            })?;
        self.bookmarks = self.pipeline.run(&text).await?;
        Ok(self.bookmarks.len())
    }

    /// The current collection rendered with the current view state.
    pub fn render_current(&self) -> String {
        self.view.render(&self.bookmarks)
    }

    pub fn write_output(&self) -> Result<(), String> {
        fs::write(&self.config.output_path, self.render_current())
            .map_err(|e| format!("Failed to write {}: {}", self.config.output_path, e))
    }

    /// Replaces the output with a single error notice.
    pub fn write_error(&self, message: &str) -> Result<(), String> {
        fs::write(
            &self.config.output_path,
            html_renderer::render_error(message),
        )
        .map_err(|e| format!("Failed to write {}: {}", self.config.output_path, e))
    }

    /// Console loop mapping user events onto the view: `search <term>`
    /// (debounced), `sort <title|description|link>`, `view`, `clear`,
    /// `quit`. Each event rewrites the output file.
    pub async fn interactive(&mut self) -> Result<(), String> {
        let (render_tx, mut render_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("commands: search <term> | sort <title|description|link> | view | clear | quit");
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.map_err(|e| format!("stdin error: {}", e))? else {
                        break;
                    };
                    if !self.handle_command(line.trim(), &render_tx).await? {
                        break;
                    }
                }
                Some(html) = render_rx.recv() => {
                    fs::write(&self.config.output_path, html)
                        .map_err(|e| format!("Failed to write {}: {}", self.config.output_path, e))?;
                    println!("re-rendered -> {}", self.config.output_path);
                }
            }
        }
        Ok(())
    }

    /// Handles one console command. Returns false when the loop should end.
    async fn handle_command(
        &mut self,
        line: &str,
        render_tx: &UnboundedSender<String>,
    ) -> Result<bool, String> {
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => return Ok(false),
            "search" => {
                self.view.set_search_term(rest);
                // Snapshot the state for the debounced render; only the last
                // input within the window reaches the output file.
                let bookmarks = self.bookmarks.clone();
                let mode = self.view.view_mode();
                let key = self.view.sort_key();
                let ascending = self.view.ascending();
                let term = rest.to_string();
                let tx = render_tx.clone();
                self.view.debounce(move || {
                    let visible = CollectionView::sort(
                        CollectionView::filter(&bookmarks, &term),
                        key,
                        ascending,
                    );
                    let _ = tx.send(html_renderer::render(&visible, mode, bookmarks.len()));
                });
            }
            "sort" => match SortKey::parse(rest) {
                Some(key) => {
                    self.view.select_sort_key(key);
                    let direction = if self.view.ascending() {
                        "ascending"
                    } else {
                        "descending"
                    };
                    println!("sorting by {} {}", key.as_str(), direction);
                    self.write_output()?;
                }
                None => println!(
                    "unknown sort key: {} (expected title, description, or link)",
                    rest
                ),
            },
            "view" => {
                self.view.toggle_view();
                println!(
                    "switched to {} view (toggle shows: {})",
                    self.view.view_mode().as_str(),
                    self.view.toggle_label()
                );
                self.write_output()?;
            }
            "clear" => {
                // Clearing reloads everything, mirroring a full reload
                // rather than an in-place rerun.
                self.clear_cache().map_err(|e| e.to_string())?;
                let count = self.load().await.map_err(|e| e.to_string())?;
                println!("cache cleared, reloaded {} bookmarks", count);
                self.write_output()?;
            }
            _ => println!("unknown command: {}", command),
        }
        Ok(true)
    }
}
