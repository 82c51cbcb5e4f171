//! Entry store and the reloadable handle that publishes it.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use trickle_core::error::Result;
use trickle_core::types::Entry;

use crate::loader;
use crate::search::{self, ScoredEntry};

/// Immutable list of entries, built once per load.
#[derive(Debug, Clone)]
pub struct EntryStore {
    entries: Vec<Entry>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl EntryStore {
    /// Store with no backing file.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load from a knowledge file. Missing files give an empty store.
    pub fn load(path: &Path) -> Self {
        let entries = loader::load_file(path);
        tracing::info!("📚 Knowledge base loaded: {} entries from {}", entries.len(), path.display());
        Self {
            entries,
            source: Some(path.to_path_buf()),
            loaded_at: Utc::now(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Rank this store's entries against `query`.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<ScoredEntry<'_>>> {
        search::rank(query, &self.entries, max_results)
    }
}

/// Shared handle publishing the current [`EntryStore`] snapshot.
///
/// Readers clone the `Arc` and work on that snapshot; `reload` swaps in a
/// whole new store and never touches the old one.
#[derive(Debug)]
pub struct KnowledgeBase {
    current: RwLock<Arc<EntryStore>>,
    source: Option<PathBuf>,
}

impl KnowledgeBase {
    /// Wrap an already built store.
    pub fn new(store: EntryStore) -> Self {
        let source = store.source().map(Path::to_path_buf);
        Self {
            current: RwLock::new(Arc::new(store)),
            source,
        }
    }

    /// Load from a file and remember it for later reloads.
    pub fn open(path: &Path) -> Self {
        Self::new(EntryStore::load(path))
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<EntryStore> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Re-read the source file and publish the result. Returns the new
    /// entry count. A handle without a source keeps its store.
    pub fn reload(&self) -> usize {
        let Some(path) = &self.source else {
            tracing::debug!("Reload requested but knowledge base has no source file");
            return self.snapshot().len();
        };
        let fresh = Arc::new(EntryStore::load(path));
        let count = fresh.len();
        self.publish(fresh);
        count
    }

    /// Replace the snapshot with an in-memory store.
    pub fn replace(&self, store: EntryStore) {
        self.publish(Arc::new(store));
    }

    fn publish(&self, store: Arc<EntryStore>) {
        match self.current.write() {
            Ok(mut guard) => *guard = store,
            Err(poisoned) => *poisoned.into_inner() = store,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
