//! Spreadsheet export.
//!
//! Tabs are built as plain grids by [`layout`] and written through the
//! [`Spreadsheet`] trait, either to Google Sheets or to an in-memory
//! workbook for dry runs.

pub mod google;
pub mod layout;
pub mod memory;

use serde::Serialize;
use std::fmt;

use crate::{FflError, Result};

pub use google::{GoogleSheets, ServiceAccount, SpreadsheetTarget};
pub use layout::Tab;
pub use memory::MemoryWorkbook;

/// Environment variable holding the service account JSON
pub const GOOGLE_CREDS_ENV_VAR: &str = "GOOGLE_CREDS";

/// One spreadsheet cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Int(i64),
}

impl Cell {
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    /// Number rounded to `places` decimals
    pub fn rounded(value: f64, places: i32) -> Self {
        let factor = 10f64.powi(places);
        Cell::Number((value * factor).round() / factor)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Int(i64::from(n))
    }
}

impl From<u16> for Cell {
    fn from(n: u16) -> Self {
        Cell::Int(i64::from(n))
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Int(n as i64)
    }
}

pub type Grid = Vec<Vec<Cell>>;

/// Build a grid row from heterogeneous values
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::sheets::Cell::from($cell)),*]
    };
}

/// Somewhere tabs can be written
#[allow(async_fn_in_trait)]
pub trait Spreadsheet {
    /// Make sure `title` exists, is empty and has at least the given size
    async fn replace_worksheet(&mut self, title: &str, rows: usize, cols: usize) -> Result<()>;

    /// Write `values` with their top-left corner at `anchor` (A1 notation)
    async fn update(&mut self, title: &str, anchor: &str, values: &[Vec<Cell>]) -> Result<()>;

    /// Remove every value from `title`
    async fn clear(&mut self, title: &str) -> Result<()>;
}

/// Zero-based (row, column) of an A1 cell reference like `B12`
pub fn parse_a1(anchor: &str) -> Result<(usize, usize)> {
    let bad = || FflError::sheets(format!("invalid cell reference '{}'", anchor));

    let split = anchor
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(bad)?;
    let (letters, digits) = anchor.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(bad());
    }

    let col = letters
        .chars()
        .fold(0usize, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1));
    let row: usize = digits.parse()?;
    if row == 0 {
        return Err(bad());
    }
    Ok((row - 1, col - 1))
}

/// Write one tab in full: replace the worksheet, then a single update from A1
pub async fn write_tab<S: Spreadsheet>(sheet: &mut S, tab: &Tab) -> Result<()> {
    let (rows, cols) = tab.min_size();
    sheet.replace_worksheet(tab.title, rows, cols).await?;
    if !tab.grid.is_empty() {
        sheet.update(tab.title, "A1", &tab.grid).await?;
    }
    tracing::info!(tab = tab.title, rows = tab.grid.len(), "worksheet written");
    Ok(())
}
