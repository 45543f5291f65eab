//! Request handlers and the state they share.

pub mod invoices;

use std::sync::Arc;

use axum::{response::IntoResponse, Json};
use cache::{InMemoryViewCache, ViewCache};
use db::{DbPool, InvoiceStore, PgInvoiceStore};
use ::invoices::InvoiceActions;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub store: Arc<dyn InvoiceStore>,
    pub cache: Arc<dyn ViewCache>,
}

impl AppState {
    /// Wire the mutation pipeline and the read path to the same gateways.
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn ViewCache>) -> Self {
        Self {
            actions: InvoiceActions::new(store.clone(), cache.clone()),
            store,
            cache,
        }
    }

    /// Postgres-backed store with an in-process view cache.
    pub fn postgres(pool: DbPool) -> Self {
        Self::new(
            Arc::new(PgInvoiceStore::new(pool)),
            Arc::new(InMemoryViewCache::new()),
        )
    }
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "invoice-actions"
    }))
}
