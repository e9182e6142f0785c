//! # Snapshot Store
//!
//! Owns a branch's data directory and the three snapshot artifacts inside
//! it. `load` never fails (see the degradation ladder in the crate docs);
//! `save` writes a consistent snapshot and is safe to call concurrently from
//! the autosave task and the shutdown path.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use chain_core::{BranchState, DEFAULT_JEANS, DEFAULT_SHIRTS, DEFAULT_STAFF};

use crate::codec;
use crate::error::{PersistError, PersistResult};

/// Stock counters artifact.
const STOCK_FILE: &str = "stock.txt";
/// Staff head-count artifact.
const STAFF_FILE: &str = "staff.txt";
/// Cumulative sales artifact.
const SALES_FILE: &str = "sales.txt";

/// Durable snapshot storage for one branch.
#[derive(Debug)]
pub struct SnapshotStore {
    dir: PathBuf,

    /// Serializes writers. Autosave ticks and the final shutdown snapshot
    /// must not interleave partial file writes.
    write_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Opens (creating if needed) the branch data directory.
    ///
    /// Fails fatally if the path exists as something other than a directory;
    /// that is a setup error the process must not paper over.
    pub fn open(dir: impl Into<PathBuf>) -> PersistResult<Self> {
        let dir = dir.into();
        match std::fs::metadata(&dir) {
            Ok(meta) if !meta.is_dir() => return Err(PersistError::NotADirectory(dir)),
            Ok(_) => {}
            Err(_) => std::fs::create_dir_all(&dir)?,
        }
        Ok(SnapshotStore {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads the last snapshot, degrading to defaults field-by-field.
    pub async fn load(&self) -> BranchState {
        let stock = self.read_pairs(STOCK_FILE).await;
        let staff = self.read_pairs(STAFF_FILE).await;
        let sales = self.read_pairs(SALES_FILE).await;

        let state = BranchState {
            shirts: codec::field_or(&stock, "shirts", DEFAULT_SHIRTS),
            jeans: codec::field_or(&stock, "jeans", DEFAULT_JEANS),
            staff_count: codec::field_or(&staff, "staff_count", DEFAULT_STAFF),
            sales_shirts: codec::field_or(&sales, "shirts", 0),
            sales_jeans: codec::field_or(&sales, "jeans", 0),
        };
        debug!(dir = %self.dir.display(), ?state, "Loaded snapshot");
        state
    }

    /// Writes a consistent snapshot of `state`.
    ///
    /// The caller passes an already-consistent copy (taken under the branch
    /// state lock); this method only guarantees the files themselves are not
    /// written by two savers at once.
    pub async fn save(&self, state: &BranchState) -> PersistResult<()> {
        let _guard = self.write_lock.lock().await;

        self.write_file(
            STOCK_FILE,
            codec::encode(&[("shirts", state.shirts), ("jeans", state.jeans)]),
        )
        .await?;
        self.write_file(
            STAFF_FILE,
            codec::encode(&[("staff_count", state.staff_count)]),
        )
        .await?;
        self.write_file(
            SALES_FILE,
            codec::encode(&[("shirts", state.sales_shirts), ("jeans", state.sales_jeans)]),
        )
        .await?;

        debug!(dir = %self.dir.display(), "Saved snapshot");
        Ok(())
    }

    async fn read_pairs(&self, file: &str) -> Vec<(String, u32)> {
        let path = self.dir.join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => codec::decode(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Snapshot unreadable, using defaults");
                Vec::new()
            }
        }
    }

    async fn write_file(&self, file: &str, contents: String) -> PersistResult<()> {
        let path = self.dir.join(file);
        tokio::fs::write(&path, contents).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
