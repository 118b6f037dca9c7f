//! Workbook model.
//!
//! Rows are positional: a row's index in [`Sheet::rows`] is its spreadsheet
//! row and a cell's index in [`Row::cells`] is its column. Styling is left to
//! the consumer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Nothing written.
    #[default]
    Empty,
    /// Label or free text.
    Text(String),
    /// Monetary amount.
    Number(Decimal),
    /// Calendar date.
    Date(NaiveDate),
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

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// One spreadsheet row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cells from column A onwards.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` at `column`, padding with empty cells.
    #[must_use]
    pub fn at(mut self, column: usize, value: impl Into<Cell>) -> Self {
        if self.cells.len() <= column {
            self.cells.resize(column + 1, Cell::Empty);
        }
        self.cells[column] = value.into();
        self
    }

    /// Writes consecutive values starting at `column`.
    #[must_use]
    pub fn from_column<I>(mut self, column: usize, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        for (offset, value) in values.into_iter().enumerate() {
            self = self.at(column + offset, value);
        }
        self
    }

    /// Cell at `column`, `Empty` past the end.
    #[must_use]
    pub fn cell(&self, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// Text at `column`, if the cell holds text.
    #[must_use]
    pub fn text(&self, column: usize) -> Option<&str> {
        match self.cell(column) {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True if no cell holds a value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }
}

/// A named worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// Tab name.
    pub name: String,
    /// Rows from row 1 onwards.
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Appends `count` blank rows.
    pub fn skip(&mut self, count: usize) {
        self.rows.extend(std::iter::repeat_n(Row::new(), count));
    }

    /// First row whose column A reads `label`.
    #[must_use]
    pub fn find_row(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.text(0) == Some(label))
    }
}

/// A multi-sheet workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in tab order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Sheet by tab name.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
