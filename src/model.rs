use serde::{Deserialize, Serialize};

/// One code/name pair from a page header. Both fields are `None` when
/// the header pattern did not match anywhere on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
}

/// Location identifiers extracted once per page and copied onto every
/// record from that page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationHeader {
    pub departamento: LocationRef,
    pub localidad: LocationRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub fn from_str_opt(s: &str) -> Option<Gender> {
        match s {
            "M" => Some(Gender::M),
            "F" => Some(Gender::F),
            _ => None,
        }
    }
}

/// One voter row. `dni` stays a string: the export contract requires
/// the full 8-character form with leading characters preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub departamento: LocationRef,
    pub localidad: LocationRef,
    pub dni: String,
    pub birth_year: i32,
    pub name: String,
    pub address: String,
    pub doc_type: String,
    pub gender: Gender,
}

/// Records extracted from a single page, tagged with the page index so
/// consolidation can re-establish page order after parallel extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub page: usize,
    pub records: Vec<VoterRecord>,
}
