use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{debug, error, warn};

use ::invoices::{InputBag, Outcome, INVOICES_ROUTE};
use db::InvoiceRow;

use super::AppState;
use crate::ApiError;

/// Turn a pipeline outcome into the navigation the browser should perform.
fn navigate(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Redirect(route) => Redirect::to(&route).into_response(),
        Outcome::Stay => StatusCode::NO_CONTENT.into_response(),
    }
}

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Invoice listing, served from the view cache while it is fresh.
///
/// The cache generation is read before the store, so a listing rendered
/// across a concurrent mutation is returned but never cached.
pub async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.cache.get(INVOICES_ROUTE).await {
        Ok(Some(body)) => return Ok(json_body(body)),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "view cache read failed, rendering from store"),
    }

    let generation = match state.cache.generation(INVOICES_ROUTE).await {
        Ok(generation) => Some(generation),
        Err(e) => {
            warn!(error = %e, "view cache generation unavailable, skipping cache");
            None
        }
    };

    let rows = state.store.list_invoices().await?;
    let body = serde_json::to_string(&rows).map_err(|e| {
        error!(error = %e, "failed to render invoice listing");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    })?;

    if let Some(generation) = generation {
        match state.cache.put(INVOICES_ROUTE, body.clone(), generation).await {
            Ok(true) => {}
            Ok(false) => debug!("invoice listing changed while rendering, not cached"),
            Err(e) => warn!(error = %e, "failed to cache invoice listing"),
        }
    }
    Ok(json_body(body))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<InvoiceRow>, ApiError> {
    Ok(Json(state.store.get_invoice(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<InputBag>,
) -> Result<Response, ApiError> {
    let outcome = state.actions.create_invoice(&form).await?;
    Ok(navigate(outcome))
}

pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Form(form): Form<InputBag>,
) -> Result<Response, ApiError> {
    let outcome = state.actions.update_invoice(&id, &form).await?;
    Ok(navigate(outcome))
}

pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let outcome = state.actions.delete_invoice(&id).await?;
    Ok(navigate(outcome))
}
