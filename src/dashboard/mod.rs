//! Single-page dashboard: figures, HTML page and the HTTP server that serves it.
//!
//! Everything shown on the page is computed once by [`DashboardContext::build`]
//! and rendered to a string before the server starts accepting connections.

pub mod figures;
pub mod page;
pub mod server;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::analyzers::aggregate::{dataset_summary, route_summaries};
use crate::analyzers::histogram::PRICE_BUCKETS;
use crate::analyzers::types::{DatasetSummary, PriceHistogram, RouteSummary};
use crate::graph::{Layout, RouteGraph, spring_layout};
use crate::table::Table;

pub use page::render_page;
pub use server::serve;

/// Rows shown in the data preview table.
pub const PREVIEW_ROWS: usize = 10;

/// Immutable inputs to the page, derived from the cleaned table.
#[derive(Debug)]
pub struct DashboardContext {
    pub table: Table,
    pub summary: DatasetSummary,
    pub routes: Vec<RouteSummary>,
    pub graph: RouteGraph,
    pub layout: Layout,
    pub histogram: PriceHistogram,
    pub generated_at: DateTime<Utc>,
}

impl DashboardContext {
    /// Aggregates, builds the route graph and lays it out with `seed`.
    #[tracing::instrument(skip(table), fields(rows = table.len()))]
    pub fn build(table: Table, seed: u64) -> Result<Self> {
        let summary = dataset_summary(&table)?;
        let routes = route_summaries(&table)?;
        let graph = RouteGraph::from_table(&table)?;
        let layout = spring_layout(&graph, seed);
        let histogram = PriceHistogram::from_table(&table, PRICE_BUCKETS)?;

        info!(
            flights = summary.total_flights,
            priced = summary.priced_flights,
            routes = routes.len(),
            airports = graph.node_count(),
            "Dashboard context ready"
        );

        Ok(Self {
            table,
            summary,
            routes,
            graph,
            layout,
            histogram,
            generated_at: Utc::now(),
        })
    }
}
