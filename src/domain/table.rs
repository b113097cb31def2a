//! In-memory tabular data.
//!
//! A [`Table`] is an ordered list of column names plus rows of
//! [`CellValue`]s. Cells are deliberately loose — the upstream
//! spreadsheet has no fixed schema — but every cell serializes to valid
//! JSON: missing values and non-finite numbers become `null`, never a
//! `NaN`/`Infinity` literal.

use serde::ser::Serializer;
use serde::Serialize;

/// One cell of the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or unrepresentable value; serializes to JSON `null`.
    Null,
    /// A finite numeric value.
    Number(f64),
    /// Free-form text.
    Text(String),
}

impl CellValue {
    /// Parse a raw CSV field.
    ///
    /// Empty fields and fields that parse to a non-finite float (`nan`,
    /// `inf`) become [`CellValue::Null`], mirroring how the upstream
    /// spreadsheet reader treats them as missing. Finite numeric text
    /// becomes a number; anything else stays text.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Null;
        }
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            Ok(_) => Self::Null,
            Err(_) => Self::Text(raw.to_owned()),
        }
    }

    /// Numeric view of the cell: numbers pass through and numeric text is
    /// coerced; anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Null => None,
        }
    }

    /// Textual rendering used when a cell feeds a string-typed derived
    /// column. Missing values render as the literal `"nan"`.
    pub fn render(&self) -> String {
        match self {
            Self::Null => "nan".to_owned(),
            Self::Number(value) => value.to_string(),
            Self::Text(raw) => raw.clone(),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            // Parsing guarantees finiteness, but guard anyway so no JSON
            // NaN literal can ever escape.
            Self::Number(value) if value.is_finite() => serializer.serialize_f64(*value),
            Self::Number(_) => serializer.serialize_none(),
            Self::Text(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Ordered columns plus rows of cells.
///
/// ## Invariants
/// - Every row has exactly `columns.len()` cells; [`Table::push_row`]
///   pads or truncates to maintain this.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with nulls or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Mutable access to the rows for in-place derivation.
    pub fn rows_mut(&mut self) -> std::slice::IterMut<'_, Vec<CellValue>> {
        self.rows.iter_mut()
    }

    /// Append a derived column. Short value lists are padded with nulls.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<CellValue>) {
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().unwrap_or(CellValue::Null));
        }
        self.columns.push(name.into());
    }
}
