//! CSV loader for the flight dataset.

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::table::{Cell, Table};

/// Reads a comma-delimited file with a header row into a [`Table`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not well-formed CSV.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let table = parse_table(file).with_context(|| format!("failed to parse {}", path.display()))?;

    info!(
        rows = table.len(),
        columns = table.columns().len(),
        "Dataset loaded"
    );
    Ok(table)
}

/// Parses CSV from any reader. Every field is kept as text.
///
/// Short records are padded with [`Cell::Missing`]; records with more fields
/// than the header are rejected.
pub fn parse_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() > columns.len() {
            let line = record.position().map_or(0, |p| p.line());
            bail!(
                "expected {} fields in line {}, saw {}",
                columns.len(),
                line,
                record.len()
            );
        }
        let mut row: Vec<Cell> = record
            .iter()
            .map(|field| Cell::Text(field.to_string()))
            .collect();
        row.resize(columns.len(), Cell::Missing);
        rows.push(row);
    }

    Table::new(columns, rows)
}
