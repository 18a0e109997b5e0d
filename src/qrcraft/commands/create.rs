use std::path::PathBuf;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CodeDraft, ContentKind, QrStyle};
use crate::qr::{self, RenderOptions};
use crate::store::{QrStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut QrStore<B>,
    name: String,
    content: String,
    kind: ContentKind,
    style: QrStyle,
    output: Option<PathBuf>,
) -> Result<CmdResult> {
    let draft = CodeDraft::new(name, content, kind, style);

    // Encode before touching the store; a payload that fails to render
    // must not leave a record behind.
    let options = RenderOptions::new(style);
    match &output {
        Some(path) => qr::render_to_file(&draft.content, &options, path)?,
        None => {
            qr::render(&draft.content, &options)?;
        }
    }

    let record = store.add_code(draft);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Code created: {}", record.name)));
    if let Some(path) = output {
        result.add_message(CmdMessage::info(format!(
            "Preview written to {}",
            path.display()
        )));
        result.output_paths.push(path);
    }
    result.affected_codes.push(record);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_a_record_with_zero_downloads() {
        let mut store = QrStore::open(InMemoryStore::new());
        let result = run(
            &mut store,
            "Test".into(),
            "https://example.com".into(),
            ContentKind::Url,
            QrStyle::Classic,
            None,
        )
        .unwrap();

        assert_eq!(store.codes().len(), 1);
        assert_eq!(result.affected_codes[0].download_count, 0);
        assert_eq!(result.affected_codes[0].content, "https://example.com");
    }

    #[test]
    fn normalizes_email_content_before_storing() {
        let mut store = QrStore::open(InMemoryStore::new());
        run(
            &mut store,
            "Mail".into(),
            "a@b.c".into(),
            ContentKind::Email,
            QrStyle::Rounded,
            None,
        )
        .unwrap();

        assert_eq!(store.codes()[0].content, "mailto:a@b.c");
    }

    #[test]
    fn failed_render_leaves_no_record() {
        let mut store = QrStore::open(InMemoryStore::new());
        let result = run(
            &mut store,
            "Huge".into(),
            "x".repeat(8000),
            ContentKind::Text,
            QrStyle::Classic,
            None,
        );

        assert!(result.is_err());
        assert!(store.codes().is_empty());
    }

    #[test]
    fn writes_a_preview_when_asked() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("preview.png");

        let mut store = QrStore::open(InMemoryStore::new());
        let result = run(
            &mut store,
            "Test".into(),
            "https://example.com".into(),
            ContentKind::Url,
            QrStyle::Dots,
            Some(path.clone()),
        )
        .unwrap();

        assert!(path.exists());
        assert_eq!(result.output_paths, vec![path]);
    }
}
