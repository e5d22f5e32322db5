//! In-memory tabular data shared by every pipeline stage.

use std::fmt;

pub const FROM_COLUMN: &str = "from";
pub const TO_COLUMN: &str = "to";
pub const PRICE_COLUMN: &str = "price";
pub const ROUTE_COLUMN: &str = "route";

/// Spurious index columns left behind by spreadsheet exports.
pub const PLACEHOLDER_COLUMNS: &[&str] = &["Unnamed: 11", "Unnamed: 12"];

/// A single table cell. Fields load as text; the cleaner coerces prices.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Missing => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table, rejecting rows whose width does not match the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> anyhow::Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            anyhow::bail!(
                "row {} has {} fields, expected {}",
                idx + 1,
                row.len(),
                columns.len()
            );
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the first `n` rows.
    pub fn head(&self, n: usize) -> &[Vec<Cell>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }

    /// Iterates over the cleaned rows as flight records.
    ///
    /// # Errors
    ///
    /// Returns an error if `from`, `to`, `price` or `route` is absent, i.e. the
    /// table has not been through [`crate::cleaner::clean`].
    pub fn flights(&self) -> anyhow::Result<impl Iterator<Item = FlightRecord<'_>>> {
        let from = self.require(FROM_COLUMN)?;
        let to = self.require(TO_COLUMN)?;
        let price = self.require(PRICE_COLUMN)?;
        let route = self.require(ROUTE_COLUMN)?;

        Ok(self.rows.iter().map(move |row| FlightRecord {
            origin: text(&row[from]),
            destination: text(&row[to]),
            price: row[price].as_number(),
            route: text(&row[route]),
        }))
    }

    fn require(&self, name: &str) -> anyhow::Result<usize> {
        self.column_index(name)
            .ok_or_else(|| anyhow::anyhow!("missing required column `{}`", name))
    }
}

fn text(cell: &Cell) -> &str {
    match cell {
        Cell::Text(s) => s,
        _ => "",
    }
}

/// Borrowed view over one cleaned row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightRecord<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub price: Option<f64>,
    pub route: &'a str,
}
