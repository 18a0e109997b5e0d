use crate::commands::{CmdMessage, CmdResult, QrCraftPaths};
use crate::config::QrCraftConfig;
use crate::error::Result;
use crate::model::QrStyle;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    SetStyle(QrStyle),
    SetDownloadWidth(u32),
}

pub fn run(paths: &QrCraftPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = QrCraftConfig::load(&paths.data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::SetStyle(style) => {
            config.default_style = style;
            config.save(&paths.data_dir)?;
            result.add_message(CmdMessage::success(format!(
                "default-style set to {}",
                style
            )));
        }
        ConfigAction::SetDownloadWidth(width) => {
            config.download_width = width;
            config.save(&paths.data_dir)?;
            result.add_message(CmdMessage::success(format!(
                "download-width set to {}",
                width
            )));
        }
    }

    Ok(result.with_config(config))
}
