//! Invoice CRUD operations.
//!
//! Each mutation is exactly one statement.  Values are always bound, never
//! interpolated into the SQL text.

use sqlx::PgPool;

use crate::{
    DbError,
    models::{InvoiceChanges, InvoiceRow, NewInvoice},
};

/// Insert a new invoice.  The store generates the `id`.
///
/// Returns the number of rows written.
pub async fn insert_invoice(pool: &PgPool, invoice: &NewInvoice) -> Result<u64, DbError> {
    let result = sqlx::query(
        r#"
        INSERT INTO invoices (customer_id, amount, status, date)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&invoice.customer_id)
    .bind(invoice.amount_cents)
    .bind(invoice.status.as_str())
    .bind(invoice.date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Overwrite customer, amount and status of the invoice keyed by `id`.
///
/// `date` is never touched.  A missing `id` affects zero rows and is not an
/// error.
pub async fn update_invoice(
    pool: &PgPool,
    id: &str,
    changes: &InvoiceChanges,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        r#"
        UPDATE invoices
        SET customer_id = $1, amount = $2, status = $3
        WHERE id = $4
        "#,
    )
    .bind(&changes.customer_id)
    .bind(changes.amount_cents)
    .bind(changes.status.as_str())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Permanently delete an invoice by its primary key.
///
/// Unlike [`get_invoice`], zero affected rows is reported as `Ok(0)`.
pub async fn delete_invoice(pool: &PgPool, id: &str) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Fetch a single invoice by its primary key.
pub async fn get_invoice(pool: &PgPool, id: &str) -> Result<InvoiceRow, DbError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
        r#"SELECT id, customer_id, amount, status, date FROM invoices WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DbError::NotFound(id.to_owned()))?;

    Ok(row)
}

/// Return all invoices, newest first.
pub async fn list_invoices(pool: &PgPool) -> Result<Vec<InvoiceRow>, DbError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
        r#"SELECT id, customer_id, amount, status, date FROM invoices ORDER BY date DESC, id"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
