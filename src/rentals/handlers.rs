use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        guard::{require_page, require_user},
        jwt::AuthUser,
    },
    customers::repo::Customer,
    pages::Page,
    state::AppState,
    toys::repo::Toy,
};

use super::availability::{availability_for_date, ToyAvailability};
use super::dto::{AvailabilityParams, CreateRentalRequest, RentalListParams, UpdateRentalRequest};
use super::repo::Rental;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rentals", get(list_rentals).post(create_rental))
        .route("/rentals/availability", get(get_availability))
        .route(
            "/rentals/:id",
            get(get_rental).put(update_rental).delete(delete_rental),
        )
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Referenced ids are plain strings in the original data model; we at least
/// reject bookings pointing at records that do not exist.
async fn check_references(
    state: &AppState,
    customer_id: Uuid,
    toy_ids: &[Uuid],
) -> Result<(), (StatusCode, String)> {
    if toy_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "At least one toy is required".into(),
        ));
    }

    if Customer::find_by_id(&state.db, customer_id)
        .await
        .map_err(internal)?
        .is_none()
    {
        return Err((StatusCode::BAD_REQUEST, "Unknown customer".into()));
    }

    let mut unique = toy_ids.to_vec();
    unique.sort();
    unique.dedup();
    let found = Toy::find_by_ids(&state.db, &unique)
        .await
        .map_err(internal)?;
    if found.len() != unique.len() {
        warn!(expected = unique.len(), found = found.len(), "rental references unknown toys");
        return Err((StatusCode::BAD_REQUEST, "Unknown toy in booking".into()));
    }

    Ok(())
}

#[instrument(skip(state))]
pub async fn list_rentals(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Query(params): Query<RentalListParams>,
) -> Result<Json<Vec<Rental>>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let rentals = Rental::list(&state.db, params.date).await.map_err(internal)?;
    Ok(Json(rentals))
}

#[instrument(skip(state))]
pub async fn get_rental(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Rental>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    match Rental::find_by_id(&state.db, id).await {
        Ok(Some(rental)) => Ok(Json(rental)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Rental not found".into())),
        Err(e) => {
            error!(error = %e, %id, "find rental failed");
            Err(internal(e))
        }
    }
}

/// Stock is not reserved here: the availability endpoint is display-side
/// only and concurrent bookings of the same toy/date can both succeed.
#[instrument(skip(state, payload))]
pub async fn create_rental(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(payload): Json<CreateRentalRequest>,
) -> Result<(StatusCode, Json<Rental>), (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    if payload.total_value < 0.0 || payload.entry_value < 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Values must not be negative".into()));
    }
    check_references(&state, payload.customer_id, &payload.toy_ids).await?;

    let rental = Rental::create(
        &state.db,
        payload.customer_id,
        payload.date,
        payload.start_time,
        payload.end_time,
        &payload.toy_ids,
        payload.total_value,
        payload.entry_value,
        &payload.payment_method,
        payload.status,
        payload.notes.as_deref(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, "create rental failed");
        internal(e)
    })?;

    info!(rental_id = %rental.id, customer_id = %rental.customer_id, date = %rental.date, "rental created");
    Ok((StatusCode::CREATED, Json(rental)))
}

#[instrument(skip(state, payload))]
pub async fn update_rental(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRentalRequest>,
) -> Result<Json<Rental>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let mut rental = match Rental::find_by_id(&state.db, id).await {
        Ok(Some(r)) => r,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Rental not found".into())),
        Err(e) => return Err(internal(e)),
    };

    if let Some(customer_id) = payload.customer_id {
        rental.customer_id = customer_id;
    }
    if let Some(date) = payload.date {
        rental.date = date;
    }
    if let Some(start_time) = payload.start_time {
        rental.start_time = start_time;
    }
    if let Some(end_time) = payload.end_time {
        rental.end_time = end_time;
    }
    if let Some(toy_ids) = payload.toy_ids {
        rental.toy_ids = toy_ids;
    }
    if let Some(total_value) = payload.total_value {
        if total_value < 0.0 {
            return Err((StatusCode::BAD_REQUEST, "Values must not be negative".into()));
        }
        rental.total_value = total_value;
    }
    if let Some(entry_value) = payload.entry_value {
        if entry_value < 0.0 {
            return Err((StatusCode::BAD_REQUEST, "Values must not be negative".into()));
        }
        rental.entry_value = entry_value;
    }
    if let Some(payment_method) = payload.payment_method {
        rental.payment_method = payment_method;
    }
    if let Some(status) = payload.status {
        rental.status = status;
    }
    if let Some(notes) = payload.notes {
        rental.notes = Some(notes);
    }

    check_references(&state, rental.customer_id, &rental.toy_ids).await?;

    let updated = Rental::update(&state.db, &rental).await.map_err(|e| {
        error!(error = %e, %id, "update rental failed");
        internal(e)
    })?;

    info!(rental_id = %updated.id, status = ?updated.status, "rental updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_rental(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let deleted = Rental::delete(&state.db, id).await.map_err(internal)?;
    if deleted == 0 {
        return Err((StatusCode::NOT_FOUND, "Rental not found".into()));
    }

    info!(rental_id = %id, "rental deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /rentals/availability?date=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn get_availability(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<Vec<ToyAvailability>>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let toys = Toy::list(&state.db).await.map_err(internal)?;
    let rentals = Rental::list(&state.db, Some(params.date))
        .await
        .map_err(internal)?;

    Ok(Json(availability_for_date(&toys, &rentals, params.date)))
}
