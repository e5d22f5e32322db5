//! Data types produced by the aggregation pipeline.

use serde::Serialize;

/// Flight count and mean price for one `"{from} to {to}"` route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub route: String,
    pub flight_count: usize,
    /// `None` when no row on the route has a valid price.
    pub avg_price: Option<f64>,
}

/// Equal-width price buckets. `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceHistogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DatasetSummary {
    pub total_flights: usize,
    pub priced_flights: usize,
    pub routes: usize,
    pub airports: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_price: Option<f64>,
}
