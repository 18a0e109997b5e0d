use super::StorageBackend;
use crate::error::Result;
use crate::model::{QrRecord, ScanRecord};

/// In-memory backend for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    codes: Vec<QrRecord>,
    scans: Vec<ScanRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the last `save_codes` left behind.
    pub fn saved_codes(&self) -> &[QrRecord] {
        &self.codes
    }

    /// What the last `save_scans` left behind.
    pub fn saved_scans(&self) -> &[ScanRecord] {
        &self.scans
    }
}

impl StorageBackend for InMemoryStore {
    fn save_codes(&mut self, codes: &[QrRecord]) -> Result<()> {
        self.codes = codes.to_vec();
        Ok(())
    }

    fn load_codes(&self) -> Result<Vec<QrRecord>> {
        Ok(self.codes.clone())
    }

    fn save_scans(&mut self, scans: &[ScanRecord]) -> Result<()> {
        self.scans = scans.to_vec();
        Ok(())
    }

    fn load_scans(&self) -> Result<Vec<ScanRecord>> {
        Ok(self.scans.clone())
    }
}
