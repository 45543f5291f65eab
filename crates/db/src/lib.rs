//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, repository functions for
//! the `invoices` table, and the [`InvoiceStore`] seam the mutation pipeline
//! talks to.  No business logic lives here.

pub mod error;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::DbError;
pub use memory::{MemoryInvoiceStore, Statement};
pub use models::{InvoiceChanges, InvoiceRow, InvoiceStatus, NewInvoice};
pub use pool::DbPool;
pub use store::{InvoiceStore, PgInvoiceStore};
