use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::model::{PriceDataset, Row};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("opening {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the price CSV at `path` and index it.
pub fn load_file(path: &Path) -> Result<PriceDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let rows = read_rows(file)?;
    Ok(PriceDataset::from_rows(rows))
}

/// Parse CSV from any reader, keeping only rows that pass [`Row::is_valid`].
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<Row>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut total = 0usize;

    for result in reader.deserialize::<RawRecord>() {
        let record = result?;
        total += 1;
        let row = record.into_row();
        if row.is_valid() {
            rows.push(row);
        }
    }

    let dropped = total - rows.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} of {total} CSV records (missing code/hospital or non-numeric medians)");
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// One CSV record as written by the upstream price export. Every column is
/// optional; absent columns come through as `None`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "code|1", default)]
    code: Option<String>,
    #[serde(rename = "code|1|type", default)]
    code_type: Option<String>,
    #[serde(rename = "description", default)]
    desc: Option<String>,
    #[serde(rename = "hospital_name", default)]
    hospital: Option<String>,
    #[serde(rename = "hospital_city", default)]
    city: Option<String>,
    #[serde(rename = "hospital_state", default)]
    state: Option<String>,
    #[serde(default)]
    med_min: Option<String>,
    #[serde(default)]
    med_max: Option<String>,
}

impl RawRecord {
    fn into_row(self) -> Row {
        Row {
            code: self.code.unwrap_or_default(),
            code_type: self.code_type.unwrap_or_default(),
            desc: self.desc.unwrap_or_default(),
            hospital: self.hospital.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            med_min: to_number(self.med_min.as_deref()),
            med_max: to_number(self.med_max.as_deref()),
        }
    }
}

/// Numeric coercion for median columns. Blank, missing and unparseable
/// cells become NaN.
fn to_number(cell: Option<&str>) -> f64 {
    match cell.map(str::trim) {
        Some(s) if !s.is_empty() => s.parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
