use std::fmt;
use std::str::FromStr;

use crate::commands::{helpers, CmdResult, DisplayCode};
use crate::error::{QrCraftError, Result};
use crate::model::ContentKind;
use crate::store::{QrStore, StorageBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Name,
    Downloads,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Name => "name",
            SortOrder::Downloads => "downloads",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for SortOrder {
    type Err = QrCraftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "name" => Ok(SortOrder::Name),
            "downloads" => Ok(SortOrder::Downloads),
            other => Err(QrCraftError::Api(format!(
                "Unknown sort order '{}' (expected newest, oldest, name or downloads)",
                other
            ))),
        }
    }
}

/// Derived view over the created collection: search, kind filter, sort.
/// Presentation convenience only; nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub kind: Option<ContentKind>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

pub fn run<B: StorageBackend>(store: &QrStore<B>, filter: &ListFilter) -> Result<CmdResult> {
    // Indexes come from the canonical newest-first order so they stay valid
    // as selectors whatever view is shown.
    let mut listed: Vec<DisplayCode> = helpers::indexed_codes(store)
        .into_iter()
        .filter(|dc| {
            let matches_kind = filter.kind.map_or(true, |k| dc.code.kind == k);
            let matches_search = filter.search.as_ref().map_or(true, |term| {
                let term = term.to_lowercase();
                dc.code.name.to_lowercase().contains(&term)
                    || dc.code.content.to_lowercase().contains(&term)
            });
            matches_kind && matches_search
        })
        .collect();

    match filter.sort {
        SortOrder::Newest => {}
        SortOrder::Oldest => listed.reverse(),
        SortOrder::Name => listed.sort_by(|a, b| {
            a.code
                .name
                .to_lowercase()
                .cmp(&b.code.name.to_lowercase())
        }),
        SortOrder::Downloads => {
            listed.sort_by(|a, b| b.code.download_count.cmp(&a.code.download_count))
        }
    }

    Ok(CmdResult::default().with_listed_codes(listed))
}

/// The scan history, newest first.
pub fn scans<B: StorageBackend>(store: &QrStore<B>) -> Result<CmdResult> {
    let mut scans = store.scans().to_vec();
    scans.sort_by(|a, b| b.scanned_at.cmp(&a.scanned_at));
    Ok(CmdResult::default().with_listed_scans(scans))
}
