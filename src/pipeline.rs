use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use rayon::prelude::*;
use tracing::warn;

use crate::consolidate::{consolidate, MergeStrategy};
use crate::model::PageResult;
use crate::parser::extract_page;
use crate::source::TextDirSource;
use crate::store::ArtifactStore;

pub struct ExtractSummary {
    pub per_page: Vec<(usize, usize)>,
    pub failed_pages: Vec<usize>,
    pub total_records: usize,
}

impl ExtractSummary {
    pub fn print(&self) {
        for (page, count) in &self.per_page {
            println!("  page_{page}: {count} records");
        }
        if !self.failed_pages.is_empty() {
            println!(
                "  failed pages (skipped): {}",
                self.failed_pages.iter().join(", ")
            );
        }
        println!(
            "Extracted {} records from {} pages ({} failed).",
            self.total_records,
            self.per_page.len(),
            self.failed_pages.len()
        );
    }
}

/// Extract every source page and persist one `page_<index>.json` per
/// page. Pages are independent, so extraction runs on the rayon pool;
/// artifacts are written in page order afterwards. A page whose source
/// cannot be read is logged and skipped with zero records; it never
/// aborts the batch. An unwritable artifact directory is fatal.
pub fn extract_pages(source: &TextDirSource, store: &ArtifactStore) -> Result<ExtractSummary> {
    let pages = source.pages()?;
    if pages.is_empty() {
        println!("No page_<n>.txt files found in {:?}.", source.dir());
        return Ok(ExtractSummary {
            per_page: Vec::new(),
            failed_pages: Vec::new(),
            total_records: 0,
        });
    }

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut summary = ExtractSummary {
        per_page: Vec::new(),
        failed_pages: Vec::new(),
        total_records: 0,
    };

    for chunk in pages.chunks(64) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|page| (page.index, source.load(page).map(|text| extract_page(&text))))
            .collect();

        for (index, result) in results {
            match result {
                Ok(records) => {
                    let page = PageResult {
                        page: index,
                        records,
                    };
                    store
                        .write_page(&page)
                        .with_context(|| format!("failed to write artifact for page {index}"))?;
                    summary.total_records += page.records.len();
                    summary.per_page.push((index, page.records.len()));
                }
                Err(error) => {
                    warn!(page = index, error = %error, "skipping unreadable page");
                    summary.failed_pages.push(index);
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(summary)
}

pub struct ConsolidateSummary {
    pub pages_merged: usize,
    pub skipped_pages: Vec<usize>,
    pub total_records: usize,
}

impl ConsolidateSummary {
    pub fn print(&self) {
        if !self.skipped_pages.is_empty() {
            println!(
                "  unreadable artifacts (excluded): {}",
                self.skipped_pages.iter().join(", ")
            );
        }
        println!(
            "Consolidated {} records from {} page artifacts.",
            self.total_records, self.pages_merged
        );
    }
}

/// Read all page artifacts in ascending index order, merge them with
/// the given strategy and persist the consolidated dataset. Unreadable
/// artifacts are logged and excluded; having nothing to merge is the
/// one fatal condition here.
pub fn consolidate_artifacts(
    store: &ArtifactStore,
    strategy: MergeStrategy,
) -> Result<ConsolidateSummary> {
    let indices = store
        .page_indices()
        .with_context(|| format!("failed to list page artifacts in {:?}", store.dir()))?;
    if indices.is_empty() {
        bail!(
            "no page artifacts found in {:?}; run 'extract' first",
            store.dir()
        );
    }

    let mut pages = Vec::new();
    let mut skipped = Vec::new();
    for index in indices {
        match store.read_page(index) {
            Ok(page) => pages.push(page),
            Err(error) => {
                warn!(page = index, error = %error, "excluding unreadable page artifact");
                skipped.push(index);
            }
        }
    }
    if pages.is_empty() {
        bail!("all page artifacts in {:?} were unreadable", store.dir());
    }

    let pages_merged = pages.len();
    let records = consolidate(pages, strategy);
    let total_records = records.len();
    store
        .write_consolidated(&records)
        .context("failed to write consolidated artifact")?;

    Ok(ConsolidateSummary {
        pages_merged,
        skipped_pages: skipped,
        total_records,
    })
}

// ── Tests ──
