//! Directed airport graph built from the cleaned flight table.
//!
//! Nodes are airport codes, edges are observed flights weighted by price.
//! Parallel flights between the same pair collapse into one edge whose weight
//! is the price of the last row seen.

pub mod layout;

use anyhow::Result;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::info;

use crate::table::Table;

pub use layout::{DEFAULT_SEED, Layout, Position, spring_layout};

#[derive(Debug, Default)]
pub struct RouteGraph {
    graph: DiGraph<String, Option<f64>>,
    /// Node lookup by airport code
    node_index: HashMap<String, NodeIndex>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one edge per row, origin to destination.
    #[tracing::instrument(skip_all, fields(rows = table.len()))]
    pub fn from_table(table: &Table) -> Result<Self> {
        let mut graph = Self::new();
        for flight in table.flights()? {
            graph.add_flight(flight.origin, flight.destination, flight.price);
        }

        info!(
            airports = graph.node_count(),
            edges = graph.edge_count(),
            "Route graph built"
        );
        Ok(graph)
    }

    /// Returns the node for `code`, creating it on first sight.
    pub fn add_airport(&mut self, code: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(code) {
            return idx;
        }
        let idx = self.graph.add_node(code.to_string());
        self.node_index.insert(code.to_string(), idx);
        idx
    }

    /// Records a flight. A repeated pair overwrites the previous price.
    pub fn add_flight(&mut self, origin: &str, destination: &str, price: Option<f64>) {
        let from = self.add_airport(origin);
        let to = self.add_airport(destination);
        self.graph.update_edge(from, to, price);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Airport codes in insertion order.
    pub fn airports(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    pub fn node_index(&self, code: &str) -> Option<NodeIndex> {
        self.node_index.get(code).copied()
    }

    /// `(origin, destination, price)` for every edge.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str, Option<f64>)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                *e.weight(),
            )
        })
    }

    /// Edge price between two airports, if a flight was recorded.
    pub fn price(&self, origin: &str, destination: &str) -> Option<Option<f64>> {
        let from = self.node_index(origin)?;
        let to = self.node_index(destination)?;
        let edge = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(edge).copied()
    }

    pub(crate) fn inner(&self) -> &DiGraph<String, Option<f64>> {
        &self.graph
    }
}
