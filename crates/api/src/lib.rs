//! `api` crate — HTTP layer for the invoice dashboard.
//!
//! Exposes:
//!   GET    /health
//!   GET    /dashboard/invoices
//!   GET    /dashboard/invoices/{id}
//!   POST   /dashboard/invoices              (create, urlencoded form)
//!   POST   /dashboard/invoices/{id}         (update, urlencoded form)
//!   POST   /dashboard/invoices/{id}/delete

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
pub use handlers::AppState;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/dashboard/invoices",
            get(handlers::invoices::list).post(handlers::invoices::create),
        )
        .route(
            "/dashboard/invoices/:id",
            get(handlers::invoices::get).post(handlers::invoices::update),
        )
        .route("/dashboard/invoices/:id/delete", post(handlers::invoices::delete))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind `bind` and serve the router until the process is stopped.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Invoice dashboard API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await
}
