use crate::commands::helpers::{resolve_selectors, CodeSelector};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{QrStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut QrStore<B>,
    selectors: &[CodeSelector],
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (index, id) in resolved {
        let name = store
            .code(&id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        if store.delete_code(&id) {
            result.add_message(CmdMessage::success(format!(
                "Code deleted ({}): {}",
                index, name
            )));
        }
    }

    Ok(result)
}
