use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::{PageResult, VoterRecord};

pub const CONSOLIDATED_FILE: &str = "all_voters.json";

static PAGE_ARTIFACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^page_(\d+)\.json$").unwrap());

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Artifact store for a run: one `page_<index>.json` per extracted
/// page plus the consolidated `all_voters.json`. Each artifact is
/// written exactly once and never revised in place.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ArtifactStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("page_{index}.json"))
    }

    pub fn consolidated_path(&self) -> PathBuf {
        self.dir.join(CONSOLIDATED_FILE)
    }

    pub fn write_page(&self, page: &PageResult) -> Result<PathBuf, StoreError> {
        let path = self.page_path(page.page);
        self.write_records(&path, &page.records)?;
        Ok(path)
    }

    pub fn write_consolidated(&self, records: &[VoterRecord]) -> Result<PathBuf, StoreError> {
        let path = self.consolidated_path();
        self.write_records(&path, records)?;
        Ok(path)
    }

    /// Page artifact indices present in the store, ascending numeric
    /// order (matches extraction order, not lexical file order).
    pub fn page_indices(&self) -> Result<Vec<usize>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut indices = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(caps) = PAGE_ARTIFACT_RE.captures(name) {
                if let Ok(index) = caps[1].parse::<usize>() {
                    indices.push(index);
                }
            }
        }
        indices.sort_unstable();
        Ok(indices)
    }

    pub fn read_page(&self, index: usize) -> Result<PageResult, StoreError> {
        let path = self.page_path(index);
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<VoterRecord> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json { path, source })?;
        Ok(PageResult {
            page: index,
            records,
        })
    }

    fn write_records(&self, path: &Path, records: &[VoterRecord]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let json =
            serde_json::to_string_pretty(records).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_page;

    fn sample_page(index: usize) -> PageResult {
        let text = "2210-RAFAELA\nCLASEAPELLIDO\n1   20123456 1985 DOE JUAN,CALLE FALSA 123, DNI M\n";
        PageResult {
            page: index,
            records: extract_page(text),
        }
    }

    #[test]
    fn page_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());
        let page = sample_page(3);

        let path = store.write_page(&page).unwrap();
        assert!(path.ends_with("page_3.json"));
        assert_eq!(store.read_page(3).unwrap(), page);
    }

    #[test]
    fn indices_sorted_numerically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());
        for n in [12, 2, 7] {
            store.write_page(&sample_page(n)).unwrap();
        }
        // The consolidated artifact must not be listed as a page.
        store.write_consolidated(&[]).unwrap();

        assert_eq!(store.page_indices().unwrap(), vec![2, 7, 12]);
    }

    #[test]
    fn missing_page_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());
        assert!(matches!(store.read_page(99), Err(StoreError::Io { .. })));
    }

    #[test]
    fn corrupt_page_is_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());
        std::fs::write(store.page_path(1), "{not json").unwrap();
        assert!(matches!(store.read_page(1), Err(StoreError::Json { .. })));
    }

    #[test]
    fn artifact_keeps_original_field_shape() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());
        store.write_page(&sample_page(1)).unwrap();

        let raw = std::fs::read_to_string(store.page_path(1)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &parsed[0];
        assert_eq!(first["dni"], "20123456");
        assert_eq!(first["birth_year"], 1985);
        assert_eq!(first["gender"], "M");
        assert_eq!(first["localidad"]["codigo"], "2210");
        assert_eq!(first["departamento"]["codigo"], "2210");
    }
}
