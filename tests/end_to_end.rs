use std::fs;

use qrcraft::api::{ListFilter, QrCraftApi, QrCraftPaths};
use qrcraft::config::QrCraftConfig;
use qrcraft::model::ContentKind;
use qrcraft::store::fs::FileStore;
use tempfile::TempDir;

fn setup() -> (TempDir, QrCraftApi<FileStore>) {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    let api = QrCraftApi::new(
        FileStore::new(data_dir.clone()),
        QrCraftConfig::default(),
        QrCraftPaths { data_dir },
    );
    (dir, api)
}

#[test]
fn test_create_download_delete_lifecycle() {
    let (dir, mut api) = setup();
    let out_dir = dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    // create
    let result = api
        .create_code(
            "Test".to_string(),
            "https://example.com".to_string(),
            ContentKind::Url,
            None,
            None,
        )
        .unwrap();
    assert_eq!(result.affected_codes[0].download_count, 0);

    let listed = api.list_codes(&ListFilter::default()).unwrap();
    assert_eq!(listed.listed_codes.len(), 1);

    // download
    api.download_code("1", Some(out_dir.clone())).unwrap();
    assert!(out_dir.join("Test.png").exists());

    let listed = api.list_codes(&ListFilter::default()).unwrap();
    assert_eq!(listed.listed_codes[0].code.download_count, 1);

    // delete
    api.delete_codes(&["1"]).unwrap();
    let listed = api.list_codes(&ListFilter::default()).unwrap();
    assert!(listed.listed_codes.is_empty());

    // the persisted collection reflects the empty store
    let raw = fs::read_to_string(dir.path().join("data").join("codes.json")).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn test_generated_code_scans_back() {
    let (dir, mut api) = setup();
    let preview = dir.path().join("preview.png");

    api.create_code(
        "Mail".to_string(),
        "someone@example.com".to_string(),
        ContentKind::Email,
        None,
        Some(preview.clone()),
    )
    .unwrap();

    let result = api.scan_image(&preview).unwrap();
    assert_eq!(result.listed_scans[0].content, "mailto:someone@example.com");
    assert_eq!(result.listed_scans[0].kind, ContentKind::Email);

    let scans = api.list_scans().unwrap();
    assert_eq!(scans.listed_scans.len(), 1);
}

#[test]
fn test_stats_reflect_activity() {
    let (_dir, mut api) = setup();

    for name in ["A", "B"] {
        api.create_code(
            name.to_string(),
            "https://example.com".to_string(),
            ContentKind::Url,
            None,
            None,
        )
        .unwrap();
    }

    let result = api.stats().unwrap();
    let report = result.stats.unwrap();
    assert_eq!(report.total_codes, 2);
    assert_eq!(report.total_downloads, 0);
    assert_eq!(report.most_used_kind, Some(ContentKind::Url));
    assert_eq!(report.last_week.len(), 7);
    // both were created today
    assert_eq!(report.last_week[6].created, 2);
}
