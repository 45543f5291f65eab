//! The `InvoiceStore` trait — the persistence contract the mutation pipeline
//! depends on.
//!
//! Mutations return the number of affected rows so callers can log it, but a
//! zero-row UPDATE or DELETE is still `Ok`.

use async_trait::async_trait;

use crate::{
    DbError, DbPool,
    models::{InvoiceChanges, InvoiceRow, NewInvoice},
    repository::invoices as invoice_repo,
};

/// Persistence gateway for invoices.
///
/// Every mutating method issues exactly one bound statement.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// `INSERT` one invoice; the store assigns its id.
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<u64, DbError>;

    /// `UPDATE` the invoice keyed by `id`.
    async fn update_invoice(&self, id: &str, changes: &InvoiceChanges) -> Result<u64, DbError>;

    /// `DELETE` the invoice keyed by `id`.
    async fn delete_invoice(&self, id: &str) -> Result<u64, DbError>;

    /// Fetch one invoice, `DbError::NotFound(id)` when absent.
    async fn get_invoice(&self, id: &str) -> Result<InvoiceRow, DbError>;

    /// All invoices, newest first.
    async fn list_invoices(&self) -> Result<Vec<InvoiceRow>, DbError>;
}

/// [`InvoiceStore`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgInvoiceStore {
    pool: DbPool,
}

impl PgInvoiceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<u64, DbError> {
        invoice_repo::insert_invoice(&self.pool, invoice).await
    }

    async fn update_invoice(&self, id: &str, changes: &InvoiceChanges) -> Result<u64, DbError> {
        invoice_repo::update_invoice(&self.pool, id, changes).await
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64, DbError> {
        invoice_repo::delete_invoice(&self.pool, id).await
    }

    async fn get_invoice(&self, id: &str) -> Result<InvoiceRow, DbError> {
        invoice_repo::get_invoice(&self.pool, id).await
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceRow>, DbError> {
        invoice_repo::list_invoices(&self.pool).await
    }
}
