use flight_routes::analyzers::aggregate::route_summaries;
use flight_routes::cleaner::clean;
use bytes::Bytes;
use flight_routes::dashboard::figures::airport_network;
use flight_routes::dashboard::{DashboardContext, render_page, server};
use flight_routes::graph::DEFAULT_SEED;
use flight_routes::loader::{load_table, parse_table};
use flight_routes::table::Table;
use std::path::Path;
use tokio::sync::oneshot;

fn sample() -> Table {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/flights_sample.csv");
    let table = load_table(&path).expect("Failed to load sample");
    clean(table).expect("Failed to clean sample")
}

#[test]
fn test_full_pipeline() {
    let table = sample();

    assert_eq!(table.len(), 12);
    assert!(table.column_index("Unnamed: 11").is_none());
    assert!(table.column_index("Unnamed: 12").is_none());
    assert_eq!(table.columns().last().map(String::as_str), Some("route"));

    let routes = route_summaries(&table).unwrap();
    let total: usize = routes.iter().map(|r| r.flight_count).sum();
    assert_eq!(total, table.len());

    let delhi_mumbai = routes.iter().find(|r| r.route == "Delhi to Mumbai").unwrap();
    assert_eq!(delhi_mumbai.flight_count, 4);
    assert_eq!(delhi_mumbai.avg_price, Some((5953.0 * 2.0 + 5956.0 + 5955.0) / 4.0));

    // N/A price counts as a flight but not toward the mean
    let blr_hyd = routes
        .iter()
        .find(|r| r.route == "Bangalore to Hyderabad")
        .unwrap();
    assert_eq!(blr_hyd.flight_count, 2);
    assert_eq!(blr_hyd.avg_price, Some(1870.0));
}

#[test]
fn test_dashboard_context() {
    let ctx = DashboardContext::build(sample(), DEFAULT_SEED).unwrap();

    assert_eq!(ctx.graph.node_count(), 6);
    assert!(ctx.graph.edge_count() <= ctx.table.len());
    assert_eq!(ctx.layout.len(), ctx.graph.node_count());
    assert_eq!(ctx.histogram.counts.len(), 50);
    assert_eq!(ctx.histogram.total(), 11);
    assert_eq!(ctx.summary.priced_flights, 11);
}

#[test]
fn test_layout_is_reproducible() {
    let a = DashboardContext::build(sample(), DEFAULT_SEED).unwrap();
    let b = DashboardContext::build(sample(), DEFAULT_SEED).unwrap();
    assert_eq!(a.layout, b.layout);

    let network_a = airport_network(&a.graph, &a.layout).to_json().unwrap();
    let network_b = airport_network(&b.graph, &b.layout).to_json().unwrap();
    assert_eq!(network_a, network_b);
}

#[test]
fn test_short_rows_load_as_missing() {
    // Trailing empty placeholder fields are often left out entirely
    let data = "from,to,price,Unnamed: 11,Unnamed: 12\nA,B,\"1,000\",,\nA,B,\"2,000\"\n";
    let table = clean(parse_table(data.as_bytes()).unwrap()).unwrap();

    let routes = route_summaries(&table).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].route, "A to B");
    assert_eq!(routes[0].flight_count, 2);
    assert_eq!(routes[0].avg_price, Some(1500.0));
}

#[tokio::test]
async fn test_serves_dashboard_page() {
    let ctx = DashboardContext::build(sample(), DEFAULT_SEED).unwrap();
    let page = Bytes::from(render_page(&ctx).unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::serve(listener, page, async move {
        let _ = shutdown_rx.await;
    }));

    let resp = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Flight Route Analysis"));
    assert!(body.contains("<td>Delhi to Mumbai</td>"));

    let resp = reqwest::get(format!("http://{}/api/routes", addr))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
