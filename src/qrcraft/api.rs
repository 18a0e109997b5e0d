//! # API Facade
//!
//! The single entry point for all qrcraft operations, regardless of the UI
//! in front of it. The facade dispatches to the command layer, normalizes
//! selector strings, and returns structured `Result<CmdResult>` values.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O formatting**: no stdout, stderr, or terminal assumptions
//!
//! ## Generic Over StorageBackend
//!
//! `QrCraftApi<B: StorageBackend>` is generic over the persistence backend:
//! production uses `FileStore`, tests use `InMemoryStore`.

use std::path::{Path, PathBuf};

use crate::commands;
use crate::commands::helpers::CodeSelector;
use crate::config::QrCraftConfig;
use crate::error::Result;
use crate::model::{ContentKind, QrStyle};
use crate::store::{QrStore, StorageBackend, StoreEvent};

pub struct QrCraftApi<B: StorageBackend> {
    store: QrStore<B>,
    config: QrCraftConfig,
    paths: commands::QrCraftPaths,
}

impl<B: StorageBackend> QrCraftApi<B> {
    /// Construct the facade and hydrate the store from the backend.
    pub fn new(backend: B, config: QrCraftConfig, paths: commands::QrCraftPaths) -> Self {
        Self {
            store: QrStore::open(backend),
            config,
            paths,
        }
    }

    /// Register a store observer; see [`QrStore::subscribe`].
    pub fn subscribe<F: Fn(&StoreEvent) + 'static>(&mut self, observer: F) {
        self.store.subscribe(observer);
    }

    pub fn create_code(
        &mut self,
        name: String,
        content: String,
        kind: ContentKind,
        style: Option<QrStyle>,
        output: Option<PathBuf>,
    ) -> Result<commands::CmdResult> {
        let style = style.unwrap_or(self.config.default_style);
        commands::create::run(&mut self.store, name, content, kind, style, output)
    }

    pub fn scan_image(&mut self, image: &Path) -> Result<commands::CmdResult> {
        commands::scan::run(&mut self.store, image)
    }

    pub fn list_codes(&self, filter: &commands::list::ListFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn list_scans(&self) -> Result<commands::CmdResult> {
        commands::list::scans(&self.store)
    }

    pub fn delete_codes<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors);
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn download_code(
        &mut self,
        selector: &str,
        out_dir: Option<PathBuf>,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(selector);
        commands::download::run(&mut self.store, &self.config, &selector, out_dir)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn paths(&self) -> &commands::QrCraftPaths {
        &self.paths
    }
}

fn parse_selector(input: &str) -> CodeSelector {
    match input.parse::<usize>() {
        Ok(n) => CodeSelector::Index(n),
        Err(_) => CodeSelector::Name(input.to_string()),
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<CodeSelector> {
    // All-numeric inputs are display indexes; anything else makes the whole
    // input one name query, joined with spaces.
    let all_indexes: Option<Vec<usize>> = inputs
        .iter()
        .map(|s| s.as_ref().parse::<usize>().ok())
        .collect();

    match all_indexes {
        Some(indexes) => indexes.into_iter().map(CodeSelector::Index).collect(),
        None => {
            let term = inputs
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<&str>>()
                .join(" ");
            vec![CodeSelector::Name(term)]
        }
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::helpers::CodeSelector as Selector;
pub use crate::commands::list::{ListFilter, SortOrder};
pub use crate::commands::stats::{DailyActivity, KindCount, MonthlyCount, StatsReport};
pub use crate::commands::{
    CmdMessage, CmdResult, DisplayCode, MessageLevel, QrCraftPaths,
};
