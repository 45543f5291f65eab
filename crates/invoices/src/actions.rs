//! Invoice mutation pipeline.
//!
//! `InvoiceActions` runs each mutation as one sequential unit of work:
//! 1. Validate the form (create / update only) — failures stop here.
//! 2. Scale the amount to cents; stamp the creation date (create only).
//! 3. Issue exactly one statement through the [`InvoiceStore`].
//! 4. Invalidate the cached invoice listing.
//! 5. Return the [`Outcome`]: redirect to the listing, or stay (delete).
//!
//! Store errors propagate unchanged and skip steps 4 and 5.

use std::sync::Arc;

use cache::ViewCache;
use chrono::{NaiveDate, Utc};
use db::InvoiceStore;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::MutationError,
    models::{InputBag, InvoiceForm, Outcome},
    schema::Schema,
};

/// Route of the invoice listing view; invalidated after every mutation.
pub const INVOICES_ROUTE: &str = "/dashboard/invoices";

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Create / update / delete for invoices, wired to injected gateways.
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn ViewCache>,
    today: fn() -> NaiveDate,
    create_schema: Schema,
    update_schema: Schema,
}

impl std::fmt::Debug for InvoiceActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceActions").finish_non_exhaustive()
    }
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn ViewCache>) -> Self {
        Self {
            store,
            cache,
            today: utc_today,
            create_schema: Schema::create_invoice(),
            update_schema: Schema::update_invoice(),
        }
    }

    /// Replace the clock used to date new invoices.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Validate `form`, insert a new invoice dated today, and redirect to the
    /// listing.
    ///
    /// # Errors
    /// [`MutationError::Validation`] before anything is written, or
    /// [`MutationError::Persistence`] if the INSERT fails.
    #[instrument(skip(self, form))]
    pub async fn create_invoice(&self, form: &InputBag) -> Result<Outcome, MutationError> {
        let parsed = InvoiceForm::parse(&self.create_schema, form)?;
        let date = (self.today)();
        let invoice = parsed.into_new_invoice(date);

        self.store.insert_invoice(&invoice).await?;
        info!(
            customer_id = %invoice.customer_id,
            amount_cents = invoice.amount_cents,
            status = %invoice.status,
            date = %date.format("%Y-%m-%d"),
            "invoice created"
        );

        self.revalidate(INVOICES_ROUTE).await;
        Ok(Outcome::Redirect(INVOICES_ROUTE.to_owned()))
    }

    /// Validate `form` and overwrite customer, amount and status of invoice
    /// `id`, then redirect to the listing.
    ///
    /// An `id` that matches no row is not an error.
    #[instrument(skip(self, form))]
    pub async fn update_invoice(&self, id: &str, form: &InputBag) -> Result<Outcome, MutationError> {
        let changes = InvoiceForm::parse(&self.update_schema, form)?.into_changes();

        let affected = self.store.update_invoice(id, &changes).await?;
        info!(
            amount_cents = changes.amount_cents,
            status = %changes.status,
            affected,
            "invoice updated"
        );

        self.revalidate(INVOICES_ROUTE).await;
        Ok(Outcome::Redirect(INVOICES_ROUTE.to_owned()))
    }

    /// Delete invoice `id` and invalidate the listing.  No redirect: delete
    /// is triggered from the listing itself.
    ///
    /// Deleting a missing `id` succeeds exactly like deleting an existing one.
    #[instrument(skip(self))]
    pub async fn delete_invoice(&self, id: &str) -> Result<Outcome, MutationError> {
        let affected = self.store.delete_invoice(id).await?;
        info!(affected, "invoice deleted");

        self.revalidate(INVOICES_ROUTE).await;
        Ok(Outcome::Stay)
    }

    /// The row is already written, so an invalidation failure only leaves a
    /// stale view behind.
    async fn revalidate(&self, route: &str) {
        match self.cache.invalidate(route).await {
            Ok(()) => debug!(route, "listing invalidated"),
            Err(e) => warn!(route, error = %e, "failed to invalidate cached view"),
        }
    }
}
