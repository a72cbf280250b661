use std::collections::{BTreeMap, BTreeSet};

use super::model::{CodeMeta, Row};

// ---------------------------------------------------------------------------
// Code index: selectable codes and their descriptive metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeIndex {
    /// Distinct codes in ascending byte order.
    pub codes: Vec<String>,
    /// First-seen type/description per code.
    pub meta_by_code: BTreeMap<String, CodeMeta>,
}

/// Index the retained rows. Later rows never overwrite a code's metadata.
pub fn build_code_index(rows: &[Row]) -> CodeIndex {
    let codes: BTreeSet<&str> = rows.iter().map(|r| r.code.as_str()).collect();

    let mut meta_by_code = BTreeMap::new();
    for r in rows {
        meta_by_code
            .entry(r.code.clone())
            .or_insert_with(|| CodeMeta {
                code_type: r.code_type.clone(),
                desc: r.desc.clone(),
            });
    }

    CodeIndex {
        codes: codes.into_iter().map(str::to_string).collect(),
        meta_by_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::row;

    fn described(code: &str, code_type: &str, desc: &str) -> Row {
        Row {
            code_type: code_type.into(),
            desc: desc.into(),
            ..row(code, "H", 1.0, 2.0)
        }
    }

    #[test]
    fn codes_are_sorted_and_distinct() {
        let rows = vec![
            row("99213", "H1", 1.0, 2.0),
            row("70450", "H2", 1.0, 2.0),
            row("99213", "H3", 1.0, 2.0),
            row("A0425", "H1", 1.0, 2.0),
        ];
        let index = build_code_index(&rows);
        assert_eq!(index.codes, vec!["70450", "99213", "A0425"]);
    }

    #[test]
    fn first_seen_metadata_wins() {
        let rows = vec![
            described("X1", "CPT", "Office visit"),
            described("X1", "HCPCS", "Something else"),
        ];
        let index = build_code_index(&rows);
        let meta = &index.meta_by_code["X1"];
        assert_eq!(meta.code_type, "CPT");
        assert_eq!(meta.desc, "Office visit");
        assert_eq!(index.meta_by_code.len(), 1);
    }

    #[test]
    fn empty_rows_give_empty_index() {
        assert_eq!(build_code_index(&[]), CodeIndex::default());
    }
}
