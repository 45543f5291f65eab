//! `invoices` crate — form validation and the invoice mutation pipeline.
//!
//! A submitted form arrives as an [`InputBag`], is checked against a
//! [`Schema`], scaled to cents, written with one statement through
//! [`db::InvoiceStore`], and the cached listing view is invalidated through
//! [`cache::ViewCache`].  Navigation is returned as an [`Outcome`] for the
//! route handler to perform.

pub mod actions;
pub mod error;
pub mod models;
pub mod money;
pub mod schema;

pub use actions::{InvoiceActions, INVOICES_ROUTE};
pub use error::{FieldIssue, MutationError, ValidationError};
pub use models::{InputBag, InvoiceForm, Outcome};
pub use money::Amount;
pub use schema::Schema;

#[cfg(test)]
mod actions_tests;
