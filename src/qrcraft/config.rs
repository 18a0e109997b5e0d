use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QrCraftError, Result};
use crate::model::QrStyle;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DOWNLOAD_WIDTH: u32 = 512;

/// Configuration for qrcraft, stored as config.json next to the collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QrCraftConfig {
    /// Style applied when `create` is not given one
    #[serde(default = "default_style")]
    pub default_style: QrStyle,

    /// Pixel width of downloaded PNGs
    #[serde(default = "default_download_width")]
    pub download_width: u32,
}

fn default_style() -> QrStyle {
    QrStyle::Classic
}

fn default_download_width() -> u32 {
    DEFAULT_DOWNLOAD_WIDTH
}

impl Default for QrCraftConfig {
    fn default() -> Self {
        Self {
            default_style: default_style(),
            download_width: default_download_width(),
        }
    }
}

impl QrCraftConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QrCraftError::Io)?;
        let config: QrCraftConfig =
            serde_json::from_str(&content).map_err(QrCraftError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QrCraftError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QrCraftError::Serialization)?;
        fs::write(config_path, content).map_err(QrCraftError::Io)?;
        Ok(())
    }
}
