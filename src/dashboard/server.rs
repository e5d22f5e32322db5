use std::future::Future;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use bytes::Bytes;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8050";

#[derive(Clone)]
struct ServerState {
    /// Shared by every response; cloning bumps a refcount.
    page: Bytes,
}

/// Builds the router serving the pre-rendered page at `/`.
pub fn router(page: Bytes) -> Router {
    Router::new()
        .route("/", get(index))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(ServerState { page })
}

/// Serves the dashboard on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, page: Bytes, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(
        url = %format!("http://{}", listener.local_addr()?),
        "Dashboard server ready"
    );

    axum::serve(listener, router(page))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Dashboard server has been shut down");
    Ok(())
}

async fn index(State(state): State<ServerState>) -> Html<Bytes> {
    Html(state.page)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_shares_rendered_page() {
        let page = Bytes::from("<h1>Flight Route Analysis</h1>");
        let state = ServerState { page: page.clone() };

        let first = index(State(state.clone())).await;
        let second = index(State(state)).await;

        assert_eq!(first.0, page);
        assert_eq!(first.0.as_ptr(), page.as_ptr());
        assert_eq!(second.0.as_ptr(), page.as_ptr());
    }
}
