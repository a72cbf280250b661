use std::collections::BTreeMap;

use serde::Serialize;

use super::index::build_code_index;

// ---------------------------------------------------------------------------
// Row – one retained CSV record
// ---------------------------------------------------------------------------

/// A single price record for one billing code at one hospital.
///
/// Only rows with a non-empty `code` and `hospital` and finite medians are
/// ever constructed by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub code: String,
    /// Code system, e.g. `CPT` or `HCPCS`.
    pub code_type: String,
    pub desc: String,
    pub hospital: String,
    pub city: String,
    pub state: String,
    pub med_min: f64,
    pub med_max: f64,
}

impl Row {
    /// Whether the row satisfies the retention rule.
    pub fn is_valid(&self) -> bool {
        !self.code.is_empty()
            && !self.hospital.is_empty()
            && self.med_min.is_finite()
            && self.med_max.is_finite()
    }
}

// ---------------------------------------------------------------------------
// CodeMeta – descriptive fields for a billing code
// ---------------------------------------------------------------------------

/// Type and description of a code, taken from the first row seen for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMeta {
    pub code_type: String,
    pub desc: String,
}

// ---------------------------------------------------------------------------
// HospitalAggregate – one hospital's rolled-up range for the selected code
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalAggregate {
    pub hospital: String,
    pub med_min: f64,
    pub med_max: f64,
    pub city: String,
    pub state: String,
}

impl HospitalAggregate {
    /// `"city, state"`, or just the state when the city is unknown.
    pub fn location(&self) -> String {
        if self.city.is_empty() {
            self.state.clone()
        } else {
            format!("{}, {}", self.city, self.state)
        }
    }
}

// ---------------------------------------------------------------------------
// PriceDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded rows together with the code index. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct PriceDataset {
    pub rows: Vec<Row>,
    /// Distinct codes, ascending.
    pub codes: Vec<String>,
    pub meta_by_code: BTreeMap<String, CodeMeta>,
}

impl PriceDataset {
    /// Build the code index from retained rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let index = build_code_index(&rows);
        PriceDataset {
            rows,
            codes: index.codes,
            meta_by_code: index.meta_by_code,
        }
    }

    pub fn meta(&self, code: &str) -> Option<&CodeMeta> {
        self.meta_by_code.get(code)
    }

    /// The code selected when a dataset is first shown.
    pub fn default_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    /// Number of retained rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows survived loading.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn row(code: &str, hospital: &str, med_min: f64, med_max: f64) -> Row {
    Row {
        code: code.to_string(),
        code_type: String::new(),
        desc: String::new(),
        hospital: hospital.to_string(),
        city: String::new(),
        state: String::new(),
        med_min,
        med_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_requires_identity_and_finite_bounds() {
        assert!(row("X1", "H1", 1.0, 2.0).is_valid());
        assert!(!row("", "H1", 1.0, 2.0).is_valid());
        assert!(!row("X1", "", 1.0, 2.0).is_valid());
        assert!(!row("X1", "H1", f64::NAN, 2.0).is_valid());
        assert!(!row("X1", "H1", 1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn location_omits_missing_city() {
        let mut agg = HospitalAggregate {
            hospital: "H".into(),
            med_min: 1.0,
            med_max: 2.0,
            city: "Austin".into(),
            state: "TX".into(),
        };
        assert_eq!(agg.location(), "Austin, TX");
        agg.city.clear();
        assert_eq!(agg.location(), "TX");
    }

    #[test]
    fn dataset_defaults_to_first_sorted_code() {
        let ds = PriceDataset::from_rows(vec![row("B2", "H1", 1.0, 2.0), row("A1", "H1", 1.0, 2.0)]);
        assert_eq!(ds.default_code(), Some("A1"));
        assert_eq!(ds.len(), 2);
        assert!(PriceDataset::default().default_code().is_none());
    }
}
