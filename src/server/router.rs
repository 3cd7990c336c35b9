use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post, put},
};

use super::games;
use crate::ingest::SourceClient;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sources: SourceClient,
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", get(games::list_games).post(games::create_game))
        .route(
            "/api/games/{id}",
            put(games::update_game).delete(games::delete_game),
        )
        .route("/api/games/search", post(games::search_games))
        .route("/api/games/populate", post(games::populate_games))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
