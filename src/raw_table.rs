//! # Raw measurement table
//!
//! Binds the rows of a [`DataBlock`] to its column names. Binding is purely
//! positional: column *i* of row *j* is the *i*-th token of that row, or the empty
//! string when the row is too short. A ragged row therefore never fails, it only
//! produces missing cells that the transformation engine turns into missing values.
//!
//! Two row layouts exist:
//!
//! * [`RowLayout::TabSeparated`] – the usual GCPD layout, one tab between cells.
//! * [`RowLayout::NumberedWhitespace`] – a historical layout whose rows are split on
//!   runs of whitespace and whose header starts with a row-number column that has no
//!   counterpart in the rows; that header entry is discarded before binding.
use std::collections::HashMap;

use csv::ReaderBuilder;
use itertools::Itertools;
use log::debug;
use serde::Serialize;

use crate::{constants::ColumnName, document::DataBlock, gcpd_errors::GcpdError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowLayout {
    TabSeparated,
    NumberedWhitespace,
}

impl RowLayout {
    /// Split the non-blank lines of `body` into rows of raw tokens.
    pub fn split_rows(&self, lines: &[&str]) -> Result<Vec<Vec<String>>, GcpdError> {
        match self {
            RowLayout::TabSeparated => {
                let joined = lines.iter().join("\n");
                let mut reader = ReaderBuilder::new()
                    .delimiter(b'\t')
                    .has_headers(false)
                    .flexible(true)
                    .quoting(false)
                    .from_reader(joined.as_bytes());

                reader
                    .records()
                    .map(|record| {
                        record
                            .map(|r| r.iter().map(str::to_string).collect())
                            .map_err(|e| GcpdError::MalformedMarkup(e.to_string()))
                    })
                    .collect()
            }
            RowLayout::NumberedWhitespace => Ok(lines
                .iter()
                .map(|line| line.split_whitespace().map(str::to_string).collect())
                .collect()),
        }
    }

    /// Column names in binding order.
    pub fn columns<'a>(&self, block: &'a DataBlock) -> Vec<&'a str> {
        let mut names = block.column_names();
        if *self == RowLayout::NumberedWhitespace && !names.is_empty() {
            names.remove(0);
        }
        names
    }
}

/// Column name → one raw cell per data row (`""` for absent cells).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawTable {
    columns: HashMap<ColumnName, Vec<String>>,
    n_rows: usize,
}

impl RawTable {
    /// Bind the rows of `block` to its header according to `layout`.
    ///
    /// Empty column names are skipped but keep their position; when a name appears
    /// twice, the rightmost column wins.
    pub fn from_block(block: &DataBlock, layout: RowLayout) -> Result<Self, GcpdError> {
        let lines: Vec<&str> = block.lines().collect();
        let rows = layout.split_rows(&lines)?;
        let names = layout.columns(block);

        let columns = names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(i, name)| {
                let cells = rows
                    .iter()
                    .map(|row| row.get(i).cloned().unwrap_or_default())
                    .collect();
                (name.to_string(), cells)
            })
            .collect();

        debug!(
            "raw table: {} rows, columns [{}]",
            rows.len(),
            names.iter().filter(|n| !n.is_empty()).join(", ")
        );

        Ok(RawTable {
            columns,
            n_rows: rows.len(),
        })
    }

    /// Build a table from explicit columns; shorter columns are padded with empty cells.
    pub fn from_columns<I, K, V>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut columns: HashMap<ColumnName, Vec<String>> = columns
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();
        let n_rows = columns.values().map(Vec::len).max().unwrap_or(0);
        for cells in columns.values_mut() {
            cells.resize(n_rows, String::new());
        }
        RawTable { columns, n_rows }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Raw cell, or `""` when the column or the row does not exist.
    pub fn cell(&self, name: &str, row: usize) -> &str {
        self.columns
            .get(name)
            .and_then(|cells| cells.get(row))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str).sorted()
    }
}
