//! Price normalization, placeholder pruning and route derivation.

use anyhow::{Context, Result};
use tracing::debug;

use crate::table::{
    Cell, FROM_COLUMN, PLACEHOLDER_COLUMNS, PRICE_COLUMN, ROUTE_COLUMN, TO_COLUMN, Table,
};

pub const ROUTE_SEPARATOR: &str = " to ";

/// Cleans a loaded table:
///
/// 1. strips `,` separators from prices and parses them, unparseable values
///    becoming [`Cell::Missing`]
/// 2. drops the known placeholder columns
/// 3. derives `route` as `"{from} to {to}"`
///
/// Running it again on its own output is a no-op.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn clean(table: Table) -> Result<Table> {
    let (mut columns, mut rows) = table.into_parts();

    let price = find(&columns, PRICE_COLUMN)?;
    let mut coerced = 0usize;
    for row in &mut rows {
        let was_present = !matches!(row[price], Cell::Missing);
        row[price] = normalize_price(&row[price]);
        if was_present && matches!(row[price], Cell::Missing) {
            coerced += 1;
        }
    }
    debug!(coerced, "Prices coerced to missing");

    let keep: Vec<bool> = columns
        .iter()
        .map(|c| !PLACEHOLDER_COLUMNS.contains(&c.as_str()))
        .collect();
    if keep.iter().any(|k| !k) {
        debug!("Dropping placeholder columns");
        columns = retain_by_mask(columns, &keep);
        rows = rows
            .into_iter()
            .map(|row| retain_by_mask(row, &keep))
            .collect();
    }

    let from = find(&columns, FROM_COLUMN)?;
    let to = find(&columns, TO_COLUMN)?;
    let route = match columns.iter().position(|c| c == ROUTE_COLUMN) {
        Some(idx) => idx,
        None => {
            columns.push(ROUTE_COLUMN.to_string());
            for row in &mut rows {
                row.push(Cell::Missing);
            }
            columns.len() - 1
        }
    };
    for row in &mut rows {
        row[route] = Cell::Text(route_label(&row[from], &row[to]));
    }

    Table::new(columns, rows)
}

/// Coerces a price cell to a number, or [`Cell::Missing`] if it does not parse.
pub fn normalize_price(cell: &Cell) -> Cell {
    match cell {
        Cell::Text(raw) => parse_price(raw).map_or(Cell::Missing, Cell::Number),
        Cell::Number(n) if n.is_finite() => Cell::Number(*n),
        _ => Cell::Missing,
    }
}

/// Parses a price after removing thousands separators.
pub fn parse_price(raw: &str) -> Option<f64> {
    let stripped: String = raw.chars().filter(|&c| c != ',').collect();
    stripped
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Joins origin and destination with the route separator.
pub fn route_label(from: &Cell, to: &Cell) -> String {
    format!("{}{}{}", from, ROUTE_SEPARATOR, to)
}

fn find(columns: &[String], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| c == name)
        .with_context(|| format!("missing required column `{}`", name))
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &k)| k.then_some(item))
        .collect()
}
