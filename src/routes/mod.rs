pub mod products;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .route("/", get(|| async { "Kalakruti Inventory API" }))
        .route("/health", get(health_check))
}

/// Full application: API routes, uploaded images under the store's URL
/// prefix, and the shared middleware stack.
pub fn build_app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.file_store.root());
    let uploads_path = state.file_store.url_path();

    create_router()
        .nest_service(&uploads_path, uploads)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
