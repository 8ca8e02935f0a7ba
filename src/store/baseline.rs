use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::snapshot::Snapshot;
use super::diff::{compare_snapshots, DiffResult};

/// Default baseline location (~/.local/share/scriptwatch/scan/status.json or platform equivalent)
pub fn default_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "scriptwatch")?;
    Some(dirs.data_dir().join("scan").join("status.json"))
}

#[derive(Debug, Clone)]
pub struct BaselineFile {
    path: PathBuf,
}

impl BaselineFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BaselineFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored baseline. The snapshot is written to a sibling
    /// file first and renamed into place, so a failed write leaves the old
    /// baseline intact.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");

        if let Err(e) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(e));
        }

        log::debug!("baseline written to {}", self.path.display());
        Ok(())
    }

    /// Read the stored baseline, with empty containers pruned.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.clone()));
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let snapshot: Snapshot =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        Ok(snapshot.pruned())
    }
}

/// Persist `snapshot` as the new baseline, overwriting any previous one.
pub fn save_baseline(store: &BaselineFile, snapshot: &Snapshot) -> Result<(), StoreError> {
    store.save(snapshot)?;
    log::info!(
        "baseline saved: {} fingerprints in {} records",
        snapshot.fingerprint_count(),
        snapshot.record_count()
    );
    Ok(())
}

/// Compare `snapshot` with the stored baseline. The baseline is not modified.
pub fn check_against_baseline(
    store: &BaselineFile,
    snapshot: &Snapshot,
) -> Result<DiffResult, StoreError> {
    let baseline = store.load()?;
    log::debug!(
        "comparing {} current fingerprints with {} baseline fingerprints",
        snapshot.fingerprint_count(),
        baseline.fingerprint_count()
    );
    Ok(compare_snapshots(snapshot, &baseline))
}
