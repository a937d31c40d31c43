//! The raw bar table handed over by the data-retrieval collaborator.
//!
//! A [`RawTable`] is deliberately loose: cells may be numbers, text or
//! missing, column names are whatever the provider used, and nothing is
//! sorted or de-duplicated. [`BarNormalizer`](crate::normalize::BarNormalizer)
//! turns it into a [`BarSeries`].

use indexmap::IndexMap;

use crate::bar::{Bar, BarSeries};
use crate::error::{Error, Result};

/// Format used when rendering timestamps back into a raw table.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One cell of a raw table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value reported.
    Missing,
    /// A value that already arrived as a number.
    Number(f64),
    /// A value that arrived as text and still needs coercion.
    Text(String),
}

impl Cell {
    /// Coerces the cell to a float.
    ///
    /// Returns `None` for missing cells, blank text and text that is not a
    /// number. A `Number` is returned as-is, `NaN` included.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Missing => None,
            Self::Number(v) => Some(*v),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A raw, column-oriented bar table keyed by a timestamp index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    index: Vec<String>,
    columns: IndexMap<String, Vec<Cell>>,
}

impl RawTable {
    /// Creates a table with the given timestamp index and no columns.
    #[must_use]
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            columns: IndexMap::new(),
        }
    }

    /// Adds a column, replacing any existing column of the same name.
    ///
    /// # Errors
    ///
    /// Returns `Error::MisalignedSeries` if the column length differs from the index length.
    ///
    /// # Example
    ///
    /// ```
    /// use stockdash::raw::{Cell, RawTable};
    ///
    /// let table = RawTable::new(vec!["2024-01-02".into(), "2024-01-03".into()])
    ///     .with_column("Close", vec![Cell::from(10.0), Cell::from("10.5")])
    ///     .unwrap();
    /// assert_eq!(table.row_count(), 2);
    /// assert!(table.column("close").is_some());
    /// ```
    pub fn with_column<C>(mut self, name: impl Into<String>, cells: Vec<C>) -> Result<Self>
    where
        C: Into<Cell>,
    {
        let name = name.into();
        if cells.len() != self.index.len() {
            return Err(Error::MisalignedSeries {
                name,
                expected: self.index.len(),
                actual: cells.len(),
            });
        }
        self.columns
            .insert(name, cells.into_iter().map(Into::into).collect());
        Ok(self)
    }

    /// Number of rows (length of the index).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// The raw timestamp strings.
    #[must_use]
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Looks up a column by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        let wanted = name.trim();
        self.columns
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, cells)| cells.as_slice())
    }

    /// Looks up the first column matching any of `names`.
    #[must_use]
    pub fn column_any(&self, names: &[&str]) -> Option<&[Cell]> {
        names.iter().find_map(|name| self.column(name))
    }
}

impl From<&BarSeries> for RawTable {
    #[allow(clippy::cast_precision_loss)]
    fn from(series: &BarSeries) -> Self {
        let index = series
            .iter()
            .map(|b| b.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .collect();
        let column = |f: fn(&Bar) -> f64| -> Vec<Cell> {
            series.iter().map(|b| Cell::Number(f(b))).collect()
        };

        let mut columns = IndexMap::new();
        columns.insert("Open".to_string(), column(|b: &Bar| b.open));
        columns.insert("High".to_string(), column(|b: &Bar| b.high));
        columns.insert("Low".to_string(), column(|b: &Bar| b.low));
        columns.insert("Close".to_string(), column(|b: &Bar| b.close));
        columns.insert("Volume".to_string(), column(|b: &Bar| b.volume as f64));

        Self { index, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_coercion() {
        assert_eq!(Cell::Missing.to_f64(), None);
        assert_eq!(Cell::from(1.5).to_f64(), Some(1.5));
        assert_eq!(Cell::from("  42.25 ").to_f64(), Some(42.25));
        assert_eq!(Cell::from("").to_f64(), None);
        assert_eq!(Cell::from("n/a").to_f64(), None);
        assert!(Cell::from(f64::NAN).to_f64().unwrap().is_nan());
        assert_eq!(Cell::from(None).to_f64(), None);
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let table = RawTable::new(vec!["2024-01-02".into()])
            .with_column(" Adj Close ", vec![1.0])
            .unwrap()
            .with_column("OPEN", vec![2.0])
            .unwrap();

        assert!(table.column("open").is_some());
        assert!(table.column("adj close").is_some());
        assert!(table.column("close").is_none());
        assert!(table.column_any(&["close", "adj close"]).is_some());
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec![" Adj Close ", "OPEN"]);
    }

    #[test]
    fn test_with_column_length_mismatch() {
        let result = RawTable::new(vec!["a".into(), "b".into()]).with_column("Close", vec![1.0]);
        assert_eq!(
            result,
            Err(Error::MisalignedSeries {
                name: "Close".to_string(),
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_with_column_replaces_existing() {
        let table = RawTable::new(vec!["a".into()])
            .with_column("Close", vec![1.0])
            .unwrap()
            .with_column("Close", vec![2.0])
            .unwrap();
        assert_eq!(table.column("close").unwrap()[0], Cell::Number(2.0));
        assert_eq!(table.column_names().count(), 1);
    }
}
