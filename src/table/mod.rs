//! Loading and cleaning of the semi-structured source tables.
//!
//! The source files are comma-separated with a fixed header row, optionally
//! preceded by a title line that must be skipped. Every column other than
//! `Year` is numeric, with `"***"` marking missing observations.

pub mod cell;

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;

use cell::parse_cell;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("row {0}: `Year` is not an integer: `{1}`")]
    InvalidYear(usize, String),

    #[error("table has no data rows")]
    EmptyTable,
}

/// A cleaned tabular dataset: one row per calendar year, one optional
/// numeric series per non-`Year` column.
#[derive(Debug)]
pub struct Table {
    years: Vec<i32>,
    columns: Vec<String>,
    series: HashMap<String, Vec<Option<f64>>>,
}

impl Table {
    /// Loads a table from a CSV file, skipping `header_skip` lines before
    /// the header row and normalizing sentinel cells to `None`.
    pub fn from_csv(path: &Path, header_skip: usize) -> Result<Self, FormatError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        for _ in 0..header_skip {
            let mut skipped = String::new();
            if reader.read_line(&mut skipped)? == 0 {
                return Err(FormatError::EmptyTable);
            }
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();

        let year_index = headers
            .iter()
            .position(|name| name == "Year")
            .ok_or_else(|| FormatError::MissingColumn("Year".to_string()))?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != year_index)
            .map(|(_, name)| name.to_string())
            .collect();

        let mut years = Vec::new();
        let mut series: HashMap<String, Vec<Option<f64>>> = columns
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();

        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;

            let raw_year = record.get(year_index).unwrap_or("").trim();
            let year = raw_year
                .parse::<i32>()
                .map_err(|_| FormatError::InvalidYear(row + 1, raw_year.to_string()))?;
            years.push(year);

            for (index, name) in headers.iter().enumerate() {
                if index == year_index {
                    continue;
                }
                let value = record.get(index).and_then(parse_cell);
                series.get_mut(name).expect("column registered").push(value);
            }
        }

        if years.is_empty() {
            return Err(FormatError::EmptyTable);
        }

        Ok(Table {
            years,
            columns,
            series,
        })
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Non-`Year` column names, in file order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Looks up a column, failing with a `FormatError` if it is absent.
    pub fn require_column(&self, name: &str) -> Result<&[Option<f64>], FormatError> {
        self.column(name)
            .ok_or_else(|| FormatError::MissingColumn(name.to_string()))
    }
}

// -- Tests -------------------------------------------------------------------
