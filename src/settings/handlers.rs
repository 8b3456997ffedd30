use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, info, instrument};

use crate::{
    auth::{
        guard::{require_admin, require_user},
        jwt::AuthUser,
    },
    state::AppState,
};

use super::dto::UpdateCompanyRequest;
use super::repo::CompanySettings;

pub fn routes() -> Router<AppState> {
    Router::new().route("/settings/company", get(get_company).put(update_company))
}

#[instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
) -> Result<Json<CompanySettings>, (StatusCode, String)> {
    require_user(&state, caller_id).await?;

    match CompanySettings::get(&state.db).await {
        Ok(Some(settings)) => Ok(Json(settings)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            "Company settings not configured".into(),
        )),
        Err(e) => {
            error!(error = %e, "load company settings failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_company(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(payload): Json<UpdateCompanyRequest>,
) -> Result<Json<CompanySettings>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Company name is required".into()));
    }

    let settings = CompanySettings::upsert(
        &state.db,
        payload.name.trim(),
        &payload.phone,
        &payload.email,
        &payload.address,
        &payload.document,
        payload.logo_url.as_deref(),
        &payload.contract_terms,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "update company settings failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(by = %caller.id, "company settings updated");
    Ok(Json(settings))
}
