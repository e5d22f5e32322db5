//! Plotly figure specifications for the dashboard charts.
//!
//! Figures are plain JSON handed to `Plotly.newPlot` in the browser; nothing is
//! recomputed client-side.

use petgraph::visit::EdgeRef;
use serde::Serialize;
use serde_json::{Value, json};

use crate::analyzers::types::{PriceHistogram, RouteSummary};
use crate::graph::{Layout, Position, RouteGraph};

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Flights per route, bars coloured by count.
pub fn flight_frequency(routes: &[RouteSummary]) -> Figure {
    let labels: Vec<&str> = routes.iter().map(|r| r.route.as_str()).collect();
    let counts: Vec<usize> = routes.iter().map(|r| r.flight_count).collect();
    let avg_prices: Vec<String> = routes.iter().map(|r| format_price(r.avg_price)).collect();

    Figure {
        data: vec![json!({
            "type": "bar",
            "x": labels,
            "y": counts,
            "customdata": avg_prices,
            "hovertemplate": "%{x}<br>Flights: %{y}<br>Avg price: %{customdata}<extra></extra>",
            "marker": { "color": counts, "colorscale": "Viridis" },
        })],
        layout: json!({
            "title": { "text": "Number of Flights per Route" },
            "xaxis": { "title": { "text": "Route" }, "tickangle": 45 },
        }),
    }
}

/// Whole-unit price, or `-` when no valid price exists.
pub fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{:.0}", p))
}

/// Airports as labelled markers, routes as line segments between them.
pub fn airport_network(graph: &RouteGraph, layout: &Layout) -> Figure {
    let inner = graph.inner();
    let at = |idx| layout.position(idx).unwrap_or_default();

    let nodes: Vec<Position> = inner.node_indices().map(at).collect();
    let labels: Vec<&str> = graph.airports().collect();

    // One segment per edge, separated by nulls so Plotly breaks the line
    let mut edge_x: Vec<Option<f64>> = Vec::with_capacity(graph.edge_count() * 3);
    let mut edge_y: Vec<Option<f64>> = Vec::with_capacity(graph.edge_count() * 3);
    for edge in inner.edge_references() {
        let (a, b) = (at(edge.source()), at(edge.target()));
        edge_x.extend([Some(a.x), Some(b.x), None]);
        edge_y.extend([Some(a.y), Some(b.y), None]);
    }

    Figure {
        data: vec![
            json!({
                "type": "scatter",
                "x": nodes.iter().map(|p| p.x).collect::<Vec<_>>(),
                "y": nodes.iter().map(|p| p.y).collect::<Vec<_>>(),
                "mode": "markers+text",
                "text": labels,
                "textposition": "top center",
                "marker": { "size": 10, "color": "blue", "opacity": 0.8 },
            }),
            json!({
                "type": "scatter",
                "x": edge_x,
                "y": edge_y,
                "mode": "lines",
                "line": { "width": 0.5, "color": "gray" },
                "opacity": 0.7,
                "hoverinfo": "skip",
            }),
        ],
        layout: json!({
            "title": { "text": "Airport Connectivity" },
            "showlegend": false,
            "hovermode": "closest",
            "xaxis": { "showgrid": false, "zeroline": false },
            "yaxis": { "showgrid": false, "zeroline": false },
        }),
    }
}

/// Price histogram drawn from precomputed buckets.
pub fn price_distribution(histogram: &PriceHistogram) -> Figure {
    Figure {
        data: vec![json!({
            "type": "bar",
            "x": histogram.centers(),
            "y": histogram.counts,
            "width": histogram.bucket_width(),
            "marker": { "color": "blue" },
        })],
        layout: json!({
            "title": { "text": "Price Distribution" },
            "xaxis": { "title": { "text": "Price" } },
            "yaxis": { "title": { "text": "Number of Flights" } },
            "bargap": 0,
        }),
    }
}
