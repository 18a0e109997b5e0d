use uuid::Uuid;

use crate::commands::DisplayCode;
use crate::error::{QrCraftError, Result};
use crate::model::QrRecord;
use crate::store::{QrStore, StorageBackend};

/// Created codes in display order (newest first), with 1-based indexes.
pub fn indexed_codes<B: StorageBackend>(store: &QrStore<B>) -> Vec<DisplayCode> {
    let mut codes: Vec<QrRecord> = store.codes().to_vec();
    codes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    codes
        .into_iter()
        .enumerate()
        .map(|(i, code)| DisplayCode { index: i + 1, code })
        .collect()
}

/// How a caller picks a created code: by display index or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSelector {
    Index(usize),
    Name(String),
}

pub fn resolve_selectors<B: StorageBackend>(
    store: &QrStore<B>,
    selectors: &[CodeSelector],
) -> Result<Vec<(usize, Uuid)>> {
    let indexed = indexed_codes(store);

    selectors
        .iter()
        .map(|selector| match selector {
            CodeSelector::Index(n) => indexed
                .iter()
                .find(|dc| dc.index == *n)
                .map(|dc| (dc.index, dc.code.id))
                .ok_or_else(|| QrCraftError::Api(format!("Index {} not found", n))),
            CodeSelector::Name(term) => {
                let term_lower = term.to_lowercase();
                indexed
                    .iter()
                    .find(|dc| dc.code.name.to_lowercase().contains(&term_lower))
                    .map(|dc| (dc.index, dc.code.id))
                    .ok_or_else(|| QrCraftError::Api(format!("No code matching '{}'", term)))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeDraft, ContentKind, QrStyle};
    use crate::store::memory::InMemoryStore;

    fn store_with(names: &[&str]) -> QrStore<InMemoryStore> {
        let mut store = QrStore::open(InMemoryStore::new());
        for name in names {
            store.add_code(CodeDraft::new(
                name.to_string(),
                "https://example.com".to_string(),
                ContentKind::Url,
                QrStyle::Classic,
            ));
        }
        store
    }

    #[test]
    fn indexes_run_newest_first() {
        let store = store_with(&["First", "Second"]);
        let indexed = indexed_codes(&store);
        assert_eq!(indexed[0].index, 1);
        assert_eq!(indexed[0].code.name, "Second");
        assert_eq!(indexed[1].code.name, "First");
    }

    #[test]
    fn resolves_index_and_name_selectors() {
        let store = store_with(&["Site Link", "Office Phone"]);

        let by_index = resolve_selectors(&store, &[CodeSelector::Index(2)]).unwrap();
        assert_eq!(by_index[0].0, 2);

        let by_name =
            resolve_selectors(&store, &[CodeSelector::Name("office".to_string())]).unwrap();
        assert_eq!(by_name[0].0, 1);
    }

    #[test]
    fn unknown_selector_is_an_error() {
        let store = store_with(&["A"]);
        assert!(resolve_selectors(&store, &[CodeSelector::Index(9)]).is_err());
        assert!(resolve_selectors(&store, &[CodeSelector::Name("zzz".into())]).is_err());
    }
}
