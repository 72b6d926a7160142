use std::sync::LazyLock;

use regex::Regex;

use crate::model::VoterRecord;
use crate::parser::{parse_header, parse_line};

/// Column-title markers that precede the data region. Header wording
/// varies across export batches, so this is a contains-check against a
/// small known set.
const DATA_START_MARKERS: [&str; 2] = ["CLASEAPELLIDO", "DOCUMENTO GEN"];

// Candidate data lines start with a sequence number then an 8-digit DNI.
static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s+\d{8}").unwrap());

/// Extract every parseable voter line from one page of raw text.
///
/// The location header is computed once and copied onto each record.
/// If no column-title marker is found the whole text is treated as
/// candidate data rather than failing, since the line grammar itself
/// filters out header and footer lines.
pub fn extract_page(raw_text: &str) -> Vec<VoterRecord> {
    let header = parse_header(raw_text);
    let lines: Vec<&str> = raw_text.lines().collect();

    let start_idx = lines
        .iter()
        .position(|line| DATA_START_MARKERS.iter().any(|m| line.contains(m)))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    lines[start_idx..]
        .iter()
        .filter(|line| CANDIDATE_RE.is_match(line.trim_start()))
        .filter_map(|line| parse_line(line, &header).into_record())
        .collect()
}

// ── Tests ──
