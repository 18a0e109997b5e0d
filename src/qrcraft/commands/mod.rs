use std::path::PathBuf;

use crate::config::QrCraftConfig;
use crate::model::{QrRecord, ScanRecord};

pub mod config;
pub mod create;
pub mod delete;
pub mod download;
pub mod helpers;
pub mod list;
pub mod scan;
pub mod stats;

#[derive(Debug, Clone)]
pub struct QrCraftPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A created code paired with its position in the canonical (newest-first)
/// listing. Indexes are what selectors resolve against.
#[derive(Debug, Clone)]
pub struct DisplayCode {
    pub index: usize,
    pub code: QrRecord,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_codes: Vec<QrRecord>,
    pub listed_codes: Vec<DisplayCode>,
    pub listed_scans: Vec<ScanRecord>,
    pub output_paths: Vec<PathBuf>,
    pub stats: Option<stats::StatsReport>,
    pub config: Option<QrCraftConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_codes(mut self, codes: Vec<DisplayCode>) -> Self {
        self.listed_codes = codes;
        self
    }

    pub fn with_listed_scans(mut self, scans: Vec<ScanRecord>) -> Self {
        self.listed_scans = scans;
        self
    }

    pub fn with_stats(mut self, stats: stats::StatsReport) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_config(mut self, config: QrCraftConfig) -> Self {
        self.config = Some(config);
        self
    }
}
