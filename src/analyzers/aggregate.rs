use crate::analyzers::types::{DatasetSummary, RouteSummary};
use crate::analyzers::utility::{mean, min_max};
use crate::table::Table;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

/// Groups cleaned rows by route label (exact match) into [`RouteSummary`] rows,
/// ordered by route.
///
/// Every row counts toward `flight_count`; only valid prices feed `avg_price`.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn route_summaries(table: &Table) -> anyhow::Result<Vec<RouteSummary>> {
    let mut groups: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();

    for flight in table.flights()? {
        let (count, prices) = groups.entry(flight.route).or_default();
        *count += 1;
        if let Some(price) = flight.price {
            prices.push(price);
        }
    }

    let summaries: Vec<RouteSummary> = groups
        .into_iter()
        .map(|(route, (flight_count, prices))| RouteSummary {
            route: route.to_string(),
            flight_count,
            avg_price: mean(&prices),
        })
        .collect();

    info!(routes = summaries.len(), "Routes aggregated");
    Ok(summaries)
}

/// Computes the dataset-wide headline figures.
pub fn dataset_summary(table: &Table) -> anyhow::Result<DatasetSummary> {
    let mut prices = Vec::new();
    let mut routes = HashSet::new();
    let mut airports = HashSet::new();

    for flight in table.flights()? {
        routes.insert(flight.route);
        airports.insert(flight.origin);
        airports.insert(flight.destination);
        if let Some(price) = flight.price {
            prices.push(price);
        }
    }

    let range = min_max(&prices);

    Ok(DatasetSummary {
        total_flights: table.len(),
        priced_flights: prices.len(),
        routes: routes.len(),
        airports: airports.len(),
        min_price: range.map(|(lo, _)| lo),
        max_price: range.map(|(_, hi)| hi),
        avg_price: mean(&prices),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::clean;
    use crate::loader::parse_table;

    fn cleaned(data: &str) -> Table {
        clean(parse_table(data.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_two_rows_same_route() {
        let table = cleaned("from,to,price\nA,B,\"1,000\"\nA,B,\"2,000\"\n");
        let summaries = route_summaries(&table).unwrap();

        assert_eq!(
            summaries,
            vec![RouteSummary {
                route: "A to B".to_string(),
                flight_count: 2,
                avg_price: Some(1500.0),
            }]
        );
    }

    #[test]
    fn test_missing_price_excluded_from_mean() {
        let table = cleaned("from,to,price\nA,B,100\nA,B,N/A\nA,B,300\n");
        let summaries = route_summaries(&table).unwrap();

        assert_eq!(summaries[0].flight_count, 3);
        assert_eq!(summaries[0].avg_price, Some(200.0));
    }

    #[test]
    fn test_route_without_prices_has_no_mean() {
        let table = cleaned("from,to,price\nA,B,N/A\nC,D,10\n");
        let summaries = route_summaries(&table).unwrap();

        assert_eq!(summaries[0].route, "A to B");
        assert_eq!(summaries[0].avg_price, None);
        assert_eq!(summaries[1].avg_price, Some(10.0));
    }

    #[test]
    fn test_counts_sum_to_row_count() {
        let table = cleaned("from,to,price\nA,B,1\nB,A,2\nA,B,3\nC,A,x\nA,C,5\n");
        let summaries = route_summaries(&table).unwrap();

        let total: usize = summaries.iter().map(|s| s.flight_count).sum();
        assert_eq!(total, table.len());
        assert_eq!(summaries.len(), 4);
    }

    #[test]
    fn test_routes_are_case_sensitive() {
        let table = cleaned("from,to,price\nA,B,1\na,B,1\n");
        assert_eq!(route_summaries(&table).unwrap().len(), 2);
    }

    #[test]
    fn test_dataset_summary() {
        let table = cleaned("from,to,price\nA,B,100\nB,C,N/A\nA,B,300\n");
        let summary = dataset_summary(&table).unwrap();

        assert_eq!(summary.total_flights, 3);
        assert_eq!(summary.priced_flights, 2);
        assert_eq!(summary.routes, 2);
        assert_eq!(summary.airports, 3);
        assert_eq!(summary.min_price, Some(100.0));
        assert_eq!(summary.max_price, Some(300.0));
        assert_eq!(summary.avg_price, Some(200.0));
    }
}
