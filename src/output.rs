//! Output formatting for route summaries.
//!
//! Supports structured log lines, pretty JSON, and CSV.

use anyhow::Result;
use csv::WriterBuilder;
use std::io::Write;
use tracing::info;

use crate::analyzers::types::RouteSummary;

/// Logs one line per route with structured fields.
pub fn print_pretty(routes: &[RouteSummary]) {
    for r in routes {
        info!(
            route = %r.route,
            flight_count = r.flight_count,
            avg_price = ?r.avg_price,
            "Route"
        );
    }
}

/// Writes route summaries as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut writer: W, routes: &[RouteSummary]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, routes)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes route summaries as CSV with a header row. Missing means are empty.
pub fn write_csv<W: Write>(writer: W, routes: &[RouteSummary]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for route in routes {
        writer.serialize(route)?;
    }
    writer.flush()?;
    Ok(())
}
