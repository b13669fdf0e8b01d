//! Column merge of extractor CSV output into one feature row.
//!
//! Each extractor CSV holds a header line and (at least) one data row for
//! the submitted sequence. The merge keys every numeric column by its
//! header name; the classifier later re-orders them against its trained
//! column list.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use oncoprobe_common::{OncoprobeError, Result};

/// A single merged feature row, header-keyed.
#[derive(Debug, Clone, Default)]
pub struct FeatureRow {
    values: HashMap<String, f64>,
}

impl FeatureRow {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn insert(&mut self, column: String, value: f64) {
        self.values.insert(column, value);
    }
}

/// Merge the first data row of each CSV into a single [`FeatureRow`].
///
/// Non-numeric cells (e.g. a sequence-ID column) are skipped. A column
/// name already present keeps its first value; a later duplicate logs a
/// warning and is ignored.
pub fn merge_feature_csvs<P: AsRef<Path>>(paths: &[P]) -> Result<FeatureRow> {
    let mut row = FeatureRow::default();

    for path in paths {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| OncoprobeError::Csv(format!("{}: {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| OncoprobeError::Csv(format!("{}: {}", path.display(), e)))?
            .clone();

        let record = reader
            .records()
            .next()
            .transpose()
            .map_err(|e| OncoprobeError::Csv(format!("{}: {}", path.display(), e)))?
            .ok_or_else(|| {
                OncoprobeError::Csv(format!("{}: no data row", path.display()))
            })?;

        let mut numeric = 0usize;
        for (header, cell) in headers.iter().zip(record.iter()) {
            let Ok(value) = cell.trim().parse::<f64>() else {
                continue;
            };
            numeric += 1;
            if row.get(header).is_some() {
                warn!(column = header, file = %path.display(), "duplicate feature column ignored");
                continue;
            }
            row.insert(header.to_string(), value);
        }
        debug!(file = %path.display(), numeric, "CSV columns merged");
    }

    if row.is_empty() {
        return Err(OncoprobeError::Csv(
            "merged feature row contains no numeric columns".to_string(),
        ));
    }

    Ok(row)
}
