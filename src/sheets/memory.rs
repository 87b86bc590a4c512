//! In-memory workbook used for dry runs and tests.

use std::fmt;

use super::{parse_a1, Cell, Grid, Spreadsheet};
use crate::{FflError, Result};

#[derive(Debug, Default, Clone)]
pub struct MemoryWorkbook {
    tabs: Vec<(String, Grid)>,
    /// Number of `update` calls made so far
    pub updates: usize,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn tab(&self, title: &str) -> Option<&Grid> {
        self.tabs.iter().find(|(t, _)| t == title).map(|(_, g)| g)
    }

    fn tab_mut(&mut self, title: &str) -> Result<&mut Grid> {
        self.tabs
            .iter_mut()
            .find(|(t, _)| t == title)
            .map(|(_, g)| g)
            .ok_or_else(|| FflError::WorksheetNotFound {
                title: title.to_string(),
            })
    }

    /// Tab contents as tab-separated lines, trailing blanks trimmed
    pub fn to_tsv(&self, title: &str) -> Option<String> {
        self.tab(title).map(|grid| {
            grid.iter()
                .map(|row| {
                    let cells: Vec<String> = row.iter().map(Cell::to_string).collect();
                    cells.join("\t").trim_end().to_string()
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

impl Spreadsheet for MemoryWorkbook {
    async fn replace_worksheet(&mut self, title: &str, _rows: usize, _cols: usize) -> Result<()> {
        match self.tabs.iter().position(|(t, _)| t == title) {
            Some(i) => self.tabs[i].1.clear(),
            None => self.tabs.push((title.to_string(), Vec::new())),
        }
        Ok(())
    }

    async fn update(&mut self, title: &str, anchor: &str, values: &[Vec<Cell>]) -> Result<()> {
        let (top, left) = parse_a1(anchor)?;
        let grid = self.tab_mut(title)?;

        for (i, row) in values.iter().enumerate() {
            let r = top + i;
            if grid.len() <= r {
                grid.resize(r + 1, Vec::new());
            }
            let target = &mut grid[r];
            if target.len() < left + row.len() {
                target.resize(left + row.len(), Cell::empty());
            }
            for (j, cell) in row.iter().enumerate() {
                target[left + j] = cell.clone();
            }
        }
        self.updates += 1;
        Ok(())
    }

    async fn clear(&mut self, title: &str) -> Result<()> {
        self.tab_mut(title)?.clear();
        Ok(())
    }
}

impl fmt::Display for MemoryWorkbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (title, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "== {} ==", title)?;
            if let Some(tsv) = self.to_tsv(title) {
                if !tsv.is_empty() {
                    writeln!(f, "{}", tsv)?;
                }
            }
        }
        Ok(())
    }
}
