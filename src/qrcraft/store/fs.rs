use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StorageBackend;
use crate::error::{QrCraftError, Result};
use crate::model::{QrRecord, ScanRecord};

const CODES_FILE: &str = "codes.json";
const SCANS_FILE: &str = "scans.json";

/// File-based backend. Each collection is one JSON array on disk;
/// timestamps travel as ISO-8601 text.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(QrCraftError::Io)?;
        }
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(QrCraftError::Io)?;
        serde_json::from_str(&content).map_err(QrCraftError::Serialization)
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(items).map_err(QrCraftError::Serialization)?;
        fs::write(self.root.join(file), content).map_err(QrCraftError::Io)?;
        Ok(())
    }
}

impl StorageBackend for FileStore {
    fn save_codes(&mut self, codes: &[QrRecord]) -> Result<()> {
        self.write_collection(CODES_FILE, codes)
    }

    fn load_codes(&self) -> Result<Vec<QrRecord>> {
        self.read_collection(CODES_FILE)
    }

    fn save_scans(&mut self, scans: &[ScanRecord]) -> Result<()> {
        self.write_collection(SCANS_FILE, scans)
    }

    fn load_scans(&self) -> Result<Vec<ScanRecord>> {
        self.read_collection(SCANS_FILE)
    }
}
