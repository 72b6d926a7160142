use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

static PAGE_FILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^page_(\d+)\.txt$").unwrap());

/// One raw-text unit of work, addressable by its numeric page index.
#[derive(Debug, Clone)]
pub struct SourcePage {
    pub index: usize,
    pub path: PathBuf,
}

/// Page source backed by a directory of `page_<n>.txt` files, one per
/// page of the original registry document. How the text got there
/// (scanned-document extraction, splitting) is someone else's problem.
#[derive(Debug, Clone)]
pub struct TextDirSource {
    dir: PathBuf,
}

impl TextDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TextDirSource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List pages in ascending numeric index order. Lexical order
    /// would put page_10 before page_2, so the index is taken from the
    /// file name, not the sort position.
    pub fn pages(&self) -> Result<Vec<SourcePage>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read source directory {:?}", self.dir))?;

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(caps) = PAGE_FILE_RE.captures(name) {
                if let Ok(index) = caps[1].parse::<usize>() {
                    pages.push(SourcePage {
                        index,
                        path: entry.path(),
                    });
                }
            }
        }
        pages.sort_by_key(|p| p.index);
        Ok(pages)
    }

    pub fn load(&self, page: &SourcePage) -> Result<String> {
        fs::read_to_string(&page.path)
            .with_context(|| format!("failed to read page {} at {:?}", page.index, page.path))
    }
}

// ── Tests ──
