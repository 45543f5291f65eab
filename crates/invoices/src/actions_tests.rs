//! Tests for the invoice mutation pipeline.
//!
//! These use `MemoryInvoiceStore` and `MockViewCache`, so no Postgres or
//! cache backend is required.

use std::sync::Arc;

use cache::mock::MockViewCache;
use cache::ViewCache;
use chrono::{NaiveDate, Utc};
use db::{InvoiceChanges, InvoiceStatus, MemoryInvoiceStore, NewInvoice, Statement};
use rust_decimal::Decimal;

use crate::{money::from_cents, InputBag, InvoiceActions, MutationError, Outcome, INVOICES_ROUTE};

fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

fn form(pairs: &[(&str, &str)]) -> InputBag {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

fn setup() -> (Arc<MemoryInvoiceStore>, MockViewCache, InvoiceActions) {
    let store = Arc::new(MemoryInvoiceStore::new());
    let cache = MockViewCache::working();
    let actions = InvoiceActions::new(store.clone(), Arc::new(cache.clone()));
    (store, cache, actions)
}

// ============================================================
// create
// ============================================================

#[tokio::test]
async fn create_scales_amount_and_dates_today() {
    let (store, cache, actions) = setup();

    let outcome = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "15.50"), ("status", "pending")]))
        .await
        .expect("valid form");

    assert_eq!(outcome, Outcome::Redirect(INVOICES_ROUTE.to_owned()));

    let statements = store.statements();
    assert_eq!(statements.len(), 1);
    let Statement::Insert(inserted) = &statements[0] else {
        panic!("expected an INSERT, got {:?}", statements[0]);
    };
    assert_eq!(inserted.customer_id, "c1");
    assert_eq!(inserted.amount_cents, 1550);
    assert_eq!(inserted.status, InvoiceStatus::Pending);
    assert_eq!(
        inserted.date.format("%Y-%m-%d").to_string(),
        Utc::now().date_naive().format("%Y-%m-%d").to_string()
    );

    assert_eq!(cache.invalidated_routes(), vec![INVOICES_ROUTE]);
}

#[tokio::test]
async fn create_uses_injected_clock() {
    let (store, _cache, actions) = setup();
    let actions = actions.with_clock(fixed_day);

    let _ = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")]))
        .await
        .unwrap();

    assert_eq!(
        store.statements(),
        vec![Statement::Insert(NewInvoice {
            customer_id: "c1".into(),
            amount_cents: 100,
            status: InvoiceStatus::Paid,
            date: fixed_day(),
        })]
    );
}

#[tokio::test]
async fn create_without_status_writes_nothing() {
    let (store, cache, actions) = setup();

    let err = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "15.50")]))
        .await
        .unwrap_err();

    let MutationError::Validation(v) = err else {
        panic!("expected a validation error");
    };
    assert!(v.has_field("status"));
    assert!(store.statements().is_empty());
    assert!(cache.invalidated_routes().is_empty());
}

#[tokio::test]
async fn create_with_unknown_status_writes_nothing() {
    let (store, cache, actions) = setup();

    let err = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "15.50"), ("status", "void")]))
        .await
        .unwrap_err();

    assert!(matches!(err, MutationError::Validation(ref v) if v.has_field("status")));
    assert!(store.statements().is_empty());
    assert!(cache.invalidated_routes().is_empty());
}

#[tokio::test]
async fn create_with_non_numeric_amount_fails_before_persistence() {
    let (store, _cache, actions) = setup();

    let err = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "abc"), ("status", "paid")]))
        .await
        .unwrap_err();

    match err {
        MutationError::Validation(v) => {
            assert_eq!(v.field_errors()["amount"], vec!["expected a number, received 'abc'"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.statements().is_empty());
}

#[tokio::test]
async fn create_propagates_store_failure_without_side_effects() {
    let (store, cache, actions) = setup();
    store.fail_statements(true);

    let err = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "2"), ("status", "paid")]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MutationError::Persistence(db::DbError::Sqlx(sqlx_err)) if sqlx_err.to_string().contains("closed")
    ));
    // One attempt, no retry.
    assert_eq!(store.statements().len(), 1);
    assert!(cache.invalidated_routes().is_empty());
}

// ============================================================
// update
// ============================================================

#[tokio::test]
async fn update_sets_fields_keyed_by_id() {
    let (store, cache, actions) = setup();

    let outcome = actions
        .update_invoice("42", &form(&[("customerId", "c2"), ("amount", "20"), ("status", "paid")]))
        .await
        .unwrap();

    assert_eq!(outcome.redirect_target(), Some(INVOICES_ROUTE));
    assert_eq!(
        store.statements(),
        vec![Statement::Update {
            id: "42".into(),
            changes: InvoiceChanges {
                customer_id: "c2".into(),
                amount_cents: 2000,
                status: InvoiceStatus::Paid,
            },
        }]
    );
    assert_eq!(cache.invalidated_routes(), vec![INVOICES_ROUTE]);
}

#[tokio::test]
async fn update_leaves_creation_date_alone() {
    let (store, _cache, actions) = setup();
    let actions = actions.with_clock(fixed_day);

    let _ = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "1"), ("status", "pending")]))
        .await
        .unwrap();
    let id = store.rows()[0].id.clone();

    let _ = actions
        .with_clock(|| NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
        .update_invoice(&id, &form(&[("customerId", "c1"), ("amount", "3"), ("status", "paid")]))
        .await
        .unwrap();

    let row = &store.rows()[0];
    assert_eq!(row.amount, 300);
    assert_eq!(row.status, "paid");
    assert_eq!(row.date, fixed_day());
}

#[tokio::test]
async fn update_of_missing_id_succeeds() {
    let (store, _cache, actions) = setup();

    let outcome = actions
        .update_invoice("nope", &form(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")]))
        .await;

    assert!(outcome.is_ok());
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn update_with_invalid_form_writes_nothing() {
    let (store, cache, actions) = setup();

    let err = actions
        .update_invoice("42", &form(&[("customerId", ""), ("amount", "-5"), ("status", "paid")]))
        .await
        .unwrap_err();

    let MutationError::Validation(v) = err else {
        panic!("expected a validation error");
    };
    assert!(v.has_field("customerId"));
    assert!(v.has_field("amount"));
    assert!(store.statements().is_empty());
    assert!(cache.invalidated_routes().is_empty());
}

// ============================================================
// delete
// ============================================================

#[tokio::test]
async fn delete_invalidates_but_never_redirects() {
    let (store, cache, actions) = setup();

    let outcome = actions.delete_invoice("42").await.unwrap();

    assert_eq!(outcome, Outcome::Stay);
    assert_eq!(outcome.redirect_target(), None);
    assert_eq!(store.statements(), vec![Statement::Delete { id: "42".into() }]);
    assert_eq!(cache.invalidated_routes(), vec![INVOICES_ROUTE]);
}

#[tokio::test]
async fn deleting_twice_behaves_the_same() {
    let (store, _cache, actions) = setup();
    let _ = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")]))
        .await
        .unwrap();
    let id = store.rows()[0].id.clone();

    let first = actions.delete_invoice(&id).await.unwrap();
    let second = actions.delete_invoice(&id).await.unwrap();

    assert_eq!(first, second);
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn delete_propagates_store_failure() {
    let (store, cache, actions) = setup();
    store.fail_statements(true);

    let err = actions.delete_invoice("42").await.unwrap_err();

    assert!(matches!(err, MutationError::Persistence(_)));
    assert!(cache.invalidated_routes().is_empty());
}

// ============================================================
// cache behaviour
// ============================================================

#[tokio::test]
async fn invalidation_failure_does_not_undo_the_mutation() {
    let store = Arc::new(MemoryInvoiceStore::new());
    let cache = MockViewCache::failing_invalidate("connection refused");
    let actions = InvoiceActions::new(store.clone(), Arc::new(cache.clone()));

    let outcome = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")]))
        .await
        .unwrap();

    assert_eq!(outcome.redirect_target(), Some(INVOICES_ROUTE));
    assert_eq!(store.rows().len(), 1);
    assert_eq!(cache.invalidated_routes().len(), 1);
}

#[tokio::test]
async fn stale_listing_is_dropped_after_create() {
    let (_store, cache, actions) = setup();
    cache.put(INVOICES_ROUTE, "[]".into(), 0).await.unwrap();

    let _ = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")]))
        .await
        .unwrap();

    assert_eq!(cache.get(INVOICES_ROUTE).await.unwrap(), None);
}

#[tokio::test]
async fn stored_amount_round_trips_to_major_units() {
    let (store, _cache, actions) = setup();

    let _ = actions
        .create_invoice(&form(&[("customerId", "c1"), ("amount", "10"), ("status", "paid")]))
        .await
        .unwrap();

    let stored = store.rows()[0].amount;
    assert_eq!(stored, 1000);
    assert_eq!(from_cents(stored), Decimal::from(10));
}
