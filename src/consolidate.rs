use crate::model::{PageResult, VoterRecord};

/// How records sharing a DNI are treated during the merge.
///
/// The registry export is known to repeat rows across page boundaries,
/// so the default keeps every entry; `UniqueByDni` keeps the first
/// occurrence in page-then-line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    #[default]
    KeepDuplicates,
    UniqueByDni,
}

/// Merge page-level record lists into one dataset sorted by DNI.
///
/// Pages are concatenated in ascending page-index order and the sort
/// is stable, so records sharing a DNI keep their page-then-line
/// relative order.
pub fn consolidate(mut pages: Vec<PageResult>, strategy: MergeStrategy) -> Vec<VoterRecord> {
    pages.sort_by_key(|p| p.page);

    let mut records: Vec<VoterRecord> = pages.into_iter().flat_map(|p| p.records).collect();
    records.sort_by(|a, b| a.dni.cmp(&b.dni));

    if strategy == MergeStrategy::UniqueByDni {
        records.dedup_by(|b, a| a.dni == b.dni);
    }
    records
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, LocationHeader, VoterRecord};

    fn record(dni: &str, name: &str) -> VoterRecord {
        let header = LocationHeader::default();
        VoterRecord {
            departamento: header.departamento,
            localidad: header.localidad,
            dni: dni.to_string(),
            birth_year: 1985,
            name: name.to_string(),
            address: "CALLE FALSA 123".to_string(),
            doc_type: "DNI".to_string(),
            gender: Gender::M,
        }
    }

    fn page(index: usize, records: Vec<VoterRecord>) -> PageResult {
        PageResult {
            page: index,
            records,
        }
    }

    #[test]
    fn sorts_across_pages_by_dni() {
        let merged = consolidate(
            vec![
                page(1, vec![record("30000002", "B")]),
                page(2, vec![record("10000001", "A")]),
            ],
            MergeStrategy::KeepDuplicates,
        );
        let dnis: Vec<&str> = merged.iter().map(|r| r.dni.as_str()).collect();
        assert_eq!(dnis, vec!["10000001", "30000002"]);
    }

    #[test]
    fn ties_keep_page_then_line_order() {
        let merged = consolidate(
            vec![
                page(1, vec![record("20000000", "FIRST"), record("20000000", "SECOND")]),
                page(2, vec![record("20000000", "THIRD")]),
            ],
            MergeStrategy::KeepDuplicates,
        );
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn page_index_order_wins_over_input_order() {
        // Parallel extraction may hand pages over out of order.
        let merged = consolidate(
            vec![
                page(2, vec![record("20000000", "LATER")]),
                page(1, vec![record("20000000", "EARLIER")]),
            ],
            MergeStrategy::KeepDuplicates,
        );
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["EARLIER", "LATER"]);
    }

    #[test]
    fn keeps_duplicates_and_preserves_count() {
        let pages = vec![
            page(1, vec![record("10000001", "A"), record("20000000", "B")]),
            page(2, vec![record("10000001", "C")]),
        ];
        let total: usize = pages.iter().map(|p| p.records.len()).sum();
        let merged = consolidate(pages, MergeStrategy::KeepDuplicates);
        assert_eq!(merged.len(), total);
    }

    #[test]
    fn unique_strategy_keeps_first_occurrence() {
        let merged = consolidate(
            vec![
                page(1, vec![record("10000001", "KEPT")]),
                page(2, vec![record("10000001", "DROPPED"), record("20000000", "OTHER")]),
            ],
            MergeStrategy::UniqueByDni,
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "KEPT");
        assert_eq!(merged[1].name, "OTHER");
    }

    #[test]
    fn output_is_non_decreasing_by_dni() {
        let merged = consolidate(
            vec![
                page(1, vec![record("3", "a"), record("1", "b")]),
                page(2, vec![record("2", "c"), record("1", "d")]),
            ],
            MergeStrategy::KeepDuplicates,
        );
        assert!(merged.windows(2).all(|w| w[0].dni <= w[1].dni));
    }
}
