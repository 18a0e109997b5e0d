//! # Storage Layer
//!
//! Two pieces live here: the [`StorageBackend`] trait, which translates the
//! record collections to and from durable storage, and [`QrStore`], the
//! in-memory authority that owns both collections and mirrors every
//! mutation to its backend.
//!
//! ## Design Rationale
//!
//! Persistence is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** without changing core logic
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production file-based storage. Each collection is
//!   one JSON file under the data directory:
//!
//! ```text
//! <data dir>/
//! ├── codes.json     # created codes (JSON array)
//! ├── scans.json     # scan history (JSON array)
//! └── config.json    # configuration
//! ```
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing.
//!
//! ## Mutation Contract
//!
//! Every mutating operation on [`QrStore`] rewrites the whole affected
//! collection (not a delta), then notifies subscribers synchronously with
//! the post-mutation state. Hydration at startup is best-effort: a
//! collection that fails to load starts empty, with a diagnostic, never an
//! error. A save that fails is logged and the in-memory mutation stands.

use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{CodeDraft, ContentKind, QrRecord, ScanRecord};

pub mod fs;
pub mod memory;

/// Abstract interface for collection persistence.
///
/// Implementations write and read whole collections; partial updates are
/// not part of the contract.
pub trait StorageBackend {
    /// Replace the persisted created-code collection
    fn save_codes(&mut self, codes: &[QrRecord]) -> Result<()>;

    /// Read the created-code collection; absent storage yields an empty one
    fn load_codes(&self) -> Result<Vec<QrRecord>>;

    /// Replace the persisted scan history
    fn save_scans(&mut self, scans: &[ScanRecord]) -> Result<()>;

    /// Read the scan history; absent storage yields an empty one
    fn load_scans(&self) -> Result<Vec<ScanRecord>>;
}

/// Notification delivered to subscribers after a successful mutation.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    CodeAdded(QrRecord),
    CodeDeleted(Uuid),
    DownloadCounted { id: Uuid, count: u32 },
    ScanAdded(ScanRecord),
}

type Observer = Box<dyn Fn(&StoreEvent)>;

/// Single source of truth for both record collections.
///
/// Constructed explicitly and handed by reference to consumers; there is no
/// ambient instance. All mutations go through the methods below, which keep
/// the backend in sync and notify subscribers.
pub struct QrStore<B: StorageBackend> {
    backend: B,
    codes: Vec<QrRecord>,
    scans: Vec<ScanRecord>,
    observers: Vec<Observer>,
}

impl<B: StorageBackend> QrStore<B> {
    /// Hydrate both collections from the backend. A collection that fails
    /// to load is left empty; the failure is logged, not propagated.
    pub fn open(backend: B) -> Self {
        let codes = backend.load_codes().unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable code collection");
            Vec::new()
        });
        let scans = backend.load_scans().unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable scan history");
            Vec::new()
        });
        Self {
            backend,
            codes,
            scans,
            observers: Vec::new(),
        }
    }

    /// Register an observer, invoked synchronously after each successful
    /// mutation. Observers see the post-mutation state.
    pub fn subscribe<F: Fn(&StoreEvent) + 'static>(&mut self, observer: F) {
        self.observers.push(Box::new(observer));
    }

    pub fn codes(&self) -> &[QrRecord] {
        &self.codes
    }

    pub fn scans(&self) -> &[ScanRecord] {
        &self.scans
    }

    pub fn code(&self, id: &Uuid) -> Option<&QrRecord> {
        self.codes.iter().find(|c| c.id == *id)
    }

    /// Append a new created code. Assigns a fresh id, the current
    /// timestamp and a zero download counter. Performs no validation and
    /// never fails.
    pub fn add_code(&mut self, draft: CodeDraft) -> QrRecord {
        let record = QrRecord::new(draft);
        self.codes.push(record.clone());
        self.persist_codes();
        self.notify(&StoreEvent::CodeAdded(record.clone()));
        record
    }

    /// Remove the code with the given id. A miss is a no-op, not an error;
    /// the collection is re-persisted either way.
    pub fn delete_code(&mut self, id: &Uuid) -> bool {
        let before = self.codes.len();
        self.codes.retain(|c| c.id != *id);
        let removed = self.codes.len() != before;
        self.persist_codes();
        if removed {
            self.notify(&StoreEvent::CodeDeleted(*id));
        }
        removed
    }

    /// Increment the matching code's download counter by exactly 1. A miss
    /// is a no-op.
    pub fn increment_download(&mut self, id: &Uuid) -> bool {
        let count = match self.codes.iter_mut().find(|c| c.id == *id) {
            Some(code) => {
                code.download_count += 1;
                code.download_count
            }
            None => return false,
        };
        self.persist_codes();
        self.notify(&StoreEvent::DownloadCounted { id: *id, count });
        true
    }

    /// Append a scan result with the current timestamp. Unbounded; there is
    /// no eviction.
    pub fn add_scan(&mut self, content: String, kind: ContentKind) -> ScanRecord {
        let record = ScanRecord::new(content, kind);
        self.scans.push(record.clone());
        self.persist_scans();
        self.notify(&StoreEvent::ScanAdded(record.clone()));
        record
    }

    // Saves are best-effort: the in-memory mutation stands and the next
    // successful save replaces the whole collection anyway.
    fn persist_codes(&mut self) {
        if let Err(e) = self.backend.save_codes(&self.codes) {
            warn!(error = %e, "failed to persist code collection");
        }
    }

    fn persist_scans(&mut self) {
        if let Err(e) = self.backend.save_scans(&self.scans) {
            warn!(error = %e, "failed to persist scan history");
        }
    }

    fn notify(&self, event: &StoreEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }
}
