use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Gender, LocationHeader, VoterRecord};

// sequence number, 8-digit DNI, 4-digit birth year, name up to the
// first comma, address up to the second comma, document-type token,
// trailing gender letter.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s+(\d{8})\s+(\d{4})\s+([^,]+),([^,]+),\s*(\S+)\s+([MF])").unwrap()
});

/// Outcome of parsing one line. Registry exports interleave page
/// headers, column titles and footer lines with data lines, so a line
/// that does not fit the grammar is skipped, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(VoterRecord),
    Rejected,
}

impl ParsedLine {
    pub fn into_record(self) -> Option<VoterRecord> {
        match self {
            ParsedLine::Record(record) => Some(record),
            ParsedLine::Rejected => None,
        }
    }
}

/// Parse one registry line into a record, copying the page's location
/// fields. Returns `Rejected` on any structural mismatch.
pub fn parse_line(line: &str, header: &LocationHeader) -> ParsedLine {
    let Some(caps) = LINE_RE.captures(line.trim()) else {
        return ParsedLine::Rejected;
    };

    let Ok(birth_year) = caps[2].parse::<i32>() else {
        return ParsedLine::Rejected;
    };
    let Some(gender) = Gender::from_str_opt(&caps[6]) else {
        return ParsedLine::Rejected;
    };

    ParsedLine::Record(VoterRecord {
        departamento: header.departamento.clone(),
        localidad: header.localidad.clone(),
        dni: caps[1].to_string(),
        birth_year,
        name: caps[3].trim().to_string(),
        address: caps[4].trim().to_string(),
        doc_type: caps[5].to_string(),
        gender,
    })
}

// ── Tests ──
