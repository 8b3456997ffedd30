use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        guard::{require_page, require_user},
        jwt::AuthUser,
    },
    pages::{can_access, Page},
    state::AppState,
    users::repo::User,
};

use super::dto::{CreateTransactionRequest, LedgerParams, UpdateTransactionRequest};
use super::repo::Transaction;
use super::summary::{summarize, FinanceSummary};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/finance/summary", get(get_summary))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// The summary also feeds the dashboard, so either page grants access.
fn require_finance_or_dashboard(user: &User) -> Result<(), (StatusCode, String)> {
    if can_access(user.role, &user.allowed_pages, Page::Finance)
        || can_access(user.role, &user.allowed_pages, Page::Dashboard)
    {
        return Ok(());
    }
    Err((
        StatusCode::FORBIDDEN,
        "Page not allowed for this account".to_string(),
    ))
}

#[instrument(skip(state))]
pub async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Query(params): Query<LedgerParams>,
) -> Result<Json<Vec<Transaction>>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Finance)?;

    let rows = Transaction::list(&state.db, params.from, params.to)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_transaction(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Finance)?;

    match Transaction::find_by_id(&state.db, id).await {
        Ok(Some(tx)) => Ok(Json(tx)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Transaction not found".into())),
        Err(e) => {
            error!(error = %e, %id, "find transaction failed");
            Err(internal(e))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Finance)?;

    if payload.description.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Description is required".into()));
    }
    if payload.value < 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Value must not be negative".into()));
    }

    let tx = Transaction::create(
        &state.db,
        payload.date,
        payload.description.trim(),
        payload.value,
        payload.kind,
        &payload.category,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "create transaction failed");
        internal(e)
    })?;

    info!(transaction_id = %tx.id, kind = ?tx.kind, value = tx.value, "ledger entry created");
    Ok((StatusCode::CREATED, Json(tx)))
}

#[instrument(skip(state, payload))]
pub async fn update_transaction(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Finance)?;

    let mut tx = match Transaction::find_by_id(&state.db, id).await {
        Ok(Some(t)) => t,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Transaction not found".into())),
        Err(e) => return Err(internal(e)),
    };

    if let Some(date) = payload.date {
        tx.date = date;
    }
    if let Some(description) = payload.description {
        if description.trim().is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Description is required".into()));
        }
        tx.description = description.trim().to_string();
    }
    if let Some(value) = payload.value {
        if value < 0.0 {
            return Err((StatusCode::BAD_REQUEST, "Value must not be negative".into()));
        }
        tx.value = value;
    }
    if let Some(kind) = payload.kind {
        tx.kind = kind;
    }
    if let Some(category) = payload.category {
        tx.category = category;
    }

    let updated = Transaction::update(&state.db, &tx).await.map_err(|e| {
        error!(error = %e, %id, "update transaction failed");
        internal(e)
    })?;

    info!(transaction_id = %updated.id, "ledger entry updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Finance)?;

    let deleted = Transaction::delete(&state.db, id).await.map_err(internal)?;
    if deleted == 0 {
        return Err((StatusCode::NOT_FOUND, "Transaction not found".into()));
    }

    info!(transaction_id = %id, "ledger entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Query(params): Query<LedgerParams>,
) -> Result<Json<FinanceSummary>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_finance_or_dashboard(&caller)?;

    let rows = Transaction::list(&state.db, params.from, params.to)
        .await
        .map_err(internal)?;
    Ok(Json(summarize(&rows)))
}
