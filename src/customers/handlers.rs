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
    pages::Page,
    state::AppState,
};

use super::dto::{CreateCustomerRequest, CustomerListParams, UpdateCustomerRequest};
use super::repo::Customer;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state))]
pub async fn list_customers(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<Vec<Customer>>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Customers)?;

    let customers = Customer::list(&state.db, params.search.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(customers))
}

#[instrument(skip(state))]
pub async fn get_customer(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Customers)?;

    match Customer::find_by_id(&state.db, id).await {
        Ok(Some(customer)) => Ok(Json(customer)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Customer not found".into())),
        Err(e) => {
            error!(error = %e, %id, "find customer failed");
            Err(internal(e))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_customer(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Customers)?;

    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }
    if payload.phone.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Phone is required".into()));
    }

    let customer = Customer::create(
        &state.db,
        payload.name.trim(),
        payload.phone.trim(),
        &payload.address,
        payload.is_company,
        &payload.document,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "create customer failed");
        internal(e)
    })?;

    info!(customer_id = %customer.id, "customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

#[instrument(skip(state, payload))]
pub async fn update_customer(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Customers)?;

    let mut customer = match Customer::find_by_id(&state.db, id).await {
        Ok(Some(c)) => c,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Customer not found".into())),
        Err(e) => return Err(internal(e)),
    };

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
        }
        customer.name = name.trim().to_string();
    }
    if let Some(phone) = payload.phone {
        if phone.trim().is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Phone is required".into()));
        }
        customer.phone = phone.trim().to_string();
    }
    if let Some(address) = payload.address {
        customer.address = address;
    }
    if let Some(is_company) = payload.is_company {
        customer.is_company = is_company;
    }
    if let Some(document) = payload.document {
        customer.document = document;
    }

    let updated = Customer::update(&state.db, &customer).await.map_err(|e| {
        error!(error = %e, %id, "update customer failed");
        internal(e)
    })?;

    info!(customer_id = %updated.id, "customer updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_customer(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Customers)?;

    let deleted = Customer::delete(&state.db, id).await.map_err(internal)?;
    if deleted == 0 {
        return Err((StatusCode::NOT_FOUND, "Customer not found".into()));
    }

    info!(customer_id = %id, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
