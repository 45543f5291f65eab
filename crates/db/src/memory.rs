//! `MemoryInvoiceStore` — an in-process test double for [`InvoiceStore`].
//!
//! Keeps rows in a `Vec` and records every statement it receives so tests can
//! assert on exactly what would have been sent to Postgres.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    DbError, InvoiceStore,
    models::{InvoiceChanges, InvoiceRow, NewInvoice},
};

/// A statement as the store received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(NewInvoice),
    Update { id: String, changes: InvoiceChanges },
    Delete { id: String },
}

/// Recording in-memory invoice store.
#[derive(Debug, Default)]
pub struct MemoryInvoiceStore {
    rows: Mutex<Vec<InvoiceRow>>,
    statements: Mutex<Vec<Statement>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `rows`.
    pub fn with_rows(rows: Vec<InvoiceRow>) -> Self {
        let store = Self::new();
        store.next_id.store(rows.len() as u64, Ordering::SeqCst);
        *lock(&store.rows) = rows;
        store
    }

    /// Make every subsequent statement fail as if the pool had gone away.
    pub fn fail_statements(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every mutating statement seen so far, in call order.
    pub fn statements(&self) -> Vec<Statement> {
        lock(&self.statements).clone()
    }

    /// Snapshot of the stored rows.
    pub fn rows(&self) -> Vec<InvoiceRow> {
        lock(&self.rows).clone()
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn record(&self, statement: Statement) -> Result<(), DbError> {
        lock(&self.statements).push(statement);
        self.check_available()
    }
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<u64, DbError> {
        self.record(Statement::Insert(invoice.clone()))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.rows).push(InvoiceRow {
            id: id.to_string(),
            customer_id: invoice.customer_id.clone(),
            amount: invoice.amount_cents,
            status: invoice.status.to_string(),
            date: invoice.date,
        });
        Ok(1)
    }

    async fn update_invoice(&self, id: &str, changes: &InvoiceChanges) -> Result<u64, DbError> {
        self.record(Statement::Update { id: id.to_owned(), changes: changes.clone() })?;

        let mut affected = 0;
        for row in lock(&self.rows).iter_mut().filter(|r| r.id == id) {
            row.customer_id = changes.customer_id.clone();
            row.amount = changes.amount_cents;
            row.status = changes.status.to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64, DbError> {
        self.record(Statement::Delete { id: id.to_owned() })?;

        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn get_invoice(&self, id: &str) -> Result<InvoiceRow, DbError> {
        self.check_available()?;
        lock(&self.rows)
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| DbError::NotFound(id.to_owned()))
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceRow>, DbError> {
        self.check_available()?;
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}
