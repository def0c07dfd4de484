use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub mod reader;
pub mod table;

use reader::open_maybe_gz;
use table::{RawTable, delimiter_from_path, parse_score, read_table};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColumnError {
    #[error("column '{0}' not found")]
    Missing(String),
    #[error("column '{column}' is not numeric (line {line}: '{value}')")]
    NotNumeric {
        column: String,
        line: usize,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    /// First offending cell of a column that holds text.
    Text { line: usize, value: String },
}

/// Subjects by named score columns, stored column-major. Numeric columns
/// have `n_rows` values in subject order; missing cells are NaN.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: PathBuf,
    pub columns: Vec<String>,
    pub data: Vec<ColumnData>,
    pub n_rows: usize,
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new(
        source: PathBuf,
        columns: Vec<(String, ColumnData)>,
        n_rows: usize,
    ) -> Result<Self, InputError> {
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        let mut index = HashMap::with_capacity(columns.len());
        for (name, col) in columns {
            if let ColumnData::Numeric(values) = &col {
                if values.len() != n_rows {
                    return Err(InputError::InvalidInput(format!(
                        "column '{}' has {} values, expected {}",
                        name,
                        values.len(),
                        n_rows
                    )));
                }
            }
            if index.contains_key(&name) {
                warn!("duplicate column '{}'; keeping first", name);
            } else {
                index.insert(name.clone(), names.len());
            }
            names.push(name);
            data.push(col);
        }
        Ok(Self {
            source,
            columns: names,
            data,
            n_rows,
            index,
        })
    }

    /// All-numeric dataset, mainly for callers that build scores in memory.
    pub fn from_numeric(
        source: PathBuf,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, InputError> {
        let n_rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let columns = columns
            .into_iter()
            .map(|(name, values)| (name, ColumnData::Numeric(values)))
            .collect();
        Self::new(source, columns, n_rows)
    }

    pub fn column(&self, name: &str) -> Result<&[f64], ColumnError> {
        let idx = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| ColumnError::Missing(name.to_string()))?;
        match &self.data[idx] {
            ColumnData::Numeric(values) => Ok(values.as_slice()),
            ColumnData::Text { line, value } => Err(ColumnError::NotNumeric {
                column: name.to_string(),
                line: *line,
                value: value.clone(),
            }),
        }
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn numeric_columns(&self) -> usize {
        self.data
            .iter()
            .filter(|c| matches!(c, ColumnData::Numeric(_)))
            .count()
    }

    pub fn missing_count(&self, name: &str) -> usize {
        self.column(name)
            .map(|col| col.iter().filter(|v| !v.is_finite()).count())
            .unwrap_or(0)
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let raw = read_table(reader.as_mut(), delimiter_from_path(path))?;
    if raw.rows.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "{} has a header but no data rows",
            path.display()
        )));
    }
    let dataset = dataset_from_table(path, raw)?;

    info!(
        "loaded {}: {} subjects x {} columns ({} numeric)",
        path.display(),
        dataset.n_rows,
        dataset.n_columns(),
        dataset.numeric_columns()
    );
    Ok(dataset)
}

fn dataset_from_table(path: &Path, raw: RawTable) -> Result<Dataset, InputError> {
    let RawTable { header, rows } = raw;
    let n_rows = rows.len();
    let mut columns = Vec::with_capacity(header.len());

    for (col_idx, name) in header.into_iter().enumerate() {
        let mut values = Vec::with_capacity(n_rows);
        let mut text: Option<(usize, String)> = None;
        for (line_no, fields) in &rows {
            let cell = &fields[col_idx];
            match parse_score(cell) {
                Some(v) => values.push(v),
                None => {
                    text = Some((*line_no, cell.trim().to_string()));
                    break;
                }
            }
        }
        let data = match text {
            Some((line, value)) => {
                debug!("column '{}' is non-numeric (line {})", name, line);
                ColumnData::Text { line, value }
            }
            None => ColumnData::Numeric(values),
        };
        columns.push((name, data));
    }

    Dataset::new(path.to_path_buf(), columns, n_rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
