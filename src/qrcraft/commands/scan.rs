use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContentKind;
use crate::qr;
use crate::store::{QrStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut QrStore<B>, image: &Path) -> Result<CmdResult> {
    let content = qr::decode(image)?;
    let kind = ContentKind::classify(&content);
    let record = store.add_scan(content, kind);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Code read successfully"));
    result.add_message(CmdMessage::info(format!(
        "{}: {}",
        record.kind,
        record.kind.display_content(&record.content)
    )));
    result.listed_scans.push(record);
    Ok(result)
}
