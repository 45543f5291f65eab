//! Errors surfaced by the invoice store.

use thiserror::Error;

/// Failures of the persistence gateway.
///
/// Zero-row UPDATE and DELETE are not errors; only lookups by id report
/// [`DbError::NotFound`].
#[derive(Debug, Error)]
pub enum DbError {
    /// The driver rejected a statement or lost its connection.
    #[error("invoice statement failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// No invoice has this id.
    #[error("invoice '{0}' not found")]
    NotFound(String),

    /// The embedded `invoices` schema could not be applied.
    #[error("invoice schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_invoice() {
        assert_eq!(DbError::NotFound("42".into()).to_string(), "invoice '42' not found");
    }
}
