use std::sync::LazyLock;

use regex::Regex;

use crate::model::{LocationHeader, LocationRef};

static DEPT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)-([^0-9\n]+)").unwrap());
static LOC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{4})-([^0-9\n]+)").unwrap());

/// Extract departamento and localidad from a page's leading text.
///
/// The two patterns are matched independently against the whole text;
/// a pattern that does not match leaves both sub-fields `None`. A
/// missing header is a valid outcome, not an error. The patterns are
/// structurally similar (digits-dash-name) and can pick overlapping
/// substrings when a name itself contains digits; that ambiguity comes
/// from the source layout and is left as-is.
pub fn parse_header(raw_text: &str) -> LocationHeader {
    LocationHeader {
        departamento: capture_pair(&DEPT_RE, raw_text),
        localidad: capture_pair(&LOC_RE, raw_text),
    }
}

fn capture_pair(re: &Regex, text: &str) -> LocationRef {
    match re.captures(text) {
        Some(caps) => LocationRef {
            codigo: caps.get(1).map(|m| m.as_str().to_string()),
            nombre: caps.get(2).map(|m| m.as_str().trim().to_string()),
        },
        None => LocationRef::default(),
    }
}

// ── Tests ──
