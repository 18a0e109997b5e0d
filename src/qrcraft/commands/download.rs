use std::path::PathBuf;

use crate::commands::helpers::{resolve_selectors, CodeSelector};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::QrCraftConfig;
use crate::error::{QrCraftError, Result};
use crate::qr::{self, RenderOptions};
use crate::store::{QrStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut QrStore<B>,
    config: &QrCraftConfig,
    selector: &CodeSelector,
    out_dir: Option<PathBuf>,
) -> Result<CmdResult> {
    let (_, id) = resolve_selectors(store, std::slice::from_ref(selector))?
        .pop()
        .ok_or_else(|| QrCraftError::Api("Nothing to download".to_string()))?;
    let record = store
        .code(&id)
        .cloned()
        .ok_or(QrCraftError::CodeNotFound(id))?;

    let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(format!("{}.png", filename_for(&record.name)));

    // Write first; the counter only moves for a download that happened.
    let options = RenderOptions::new(record.style).with_width(config.download_width);
    qr::render_to_file(&record.content, &options, &path)?;
    store.increment_download(&id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Downloaded {} to {}",
        record.name,
        path.display()
    )));
    if let Some(updated) = store.code(&id) {
        result.affected_codes.push(updated.clone());
    }
    result.output_paths.push(path);
    Ok(result)
}

fn filename_for(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            _ => c,
        })
        .collect();
    if cleaned.trim().is_empty() {
        "qr-code".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeDraft, ContentKind, QrStyle};
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn seeded_store() -> QrStore<InMemoryStore> {
        let mut store = QrStore::open(InMemoryStore::new());
        store.add_code(CodeDraft::new(
            "Site".into(),
            "https://example.com".into(),
            ContentKind::Url,
            QrStyle::Elegant,
        ));
        store
    }

    #[test]
    fn writes_a_png_and_increments_the_counter() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded_store();
        let config = QrCraftConfig::default();

        let result = run(
            &mut store,
            &config,
            &CodeSelector::Index(1),
            Some(dir.path().to_path_buf()),
        )
        .unwrap();

        let expected = dir.path().join("Site.png");
        assert!(expected.exists());
        assert_eq!(result.affected_codes[0].download_count, 1);
        assert_eq!(store.codes()[0].download_count, 1);
    }

    #[test]
    fn counter_is_untouched_when_the_write_fails() {
        let mut store = seeded_store();
        let config = QrCraftConfig::default();

        let result = run(
            &mut store,
            &config,
            &CodeSelector::Index(1),
            Some(PathBuf::from("/nonexistent/dir")),
        );

        assert!(result.is_err());
        assert_eq!(store.codes()[0].download_count, 0);
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(filename_for("a/b:c"), "a-b-c");
        assert_eq!(filename_for("  "), "qr-code");
        assert_eq!(filename_for("plain"), "plain");
    }
}
