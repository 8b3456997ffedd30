use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        guard::{require_page, require_user},
        jwt::AuthUser,
    },
    customers::repo::Customer,
    finance::{dto::LedgerParams, repo::Transaction, summary::summarize},
    pages::Page,
    rentals::repo::Rental,
    settings::repo::CompanySettings,
    state::AppState,
    toys::repo::Toy,
};

use super::render::{
    render_budget, render_contract, render_customers_report, render_financial_report,
    render_receipt, DocumentError, RentalDocument,
};
use super::whatsapp::{link_for_rental, WhatsAppLink};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rentals/:id/documents/budget", get(budget))
        .route("/rentals/:id/documents/contract", get(contract))
        .route("/rentals/:id/documents/receipt", get(receipt))
        .route("/rentals/:id/whatsapp", get(whatsapp_link))
        .route("/reports/customers", get(customers_report))
        .route("/reports/financial", get(financial_report))
}

fn doc_err(e: DocumentError) -> (StatusCode, String) {
    let status = e.status();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %e, "document generation failed");
    }
    (status, e.to_string())
}

/// Resolve every record a rental-scoped document references. Dangling
/// references become errors here, never blank fields in the output.
async fn load_rental_bundle(
    state: &AppState,
    rental_id: Uuid,
) -> Result<(CompanySettings, Customer, Rental, Vec<Toy>), DocumentError> {
    let rental = Rental::find_by_id(&state.db, rental_id)
        .await?
        .ok_or(DocumentError::RentalNotFound)?;
    let customer = Customer::find_by_id(&state.db, rental.customer_id)
        .await?
        .ok_or(DocumentError::CustomerMissing)?;
    let company = CompanySettings::get(&state.db)
        .await?
        .ok_or(DocumentError::SettingsMissing)?;
    let toys = Toy::find_by_ids(&state.db, &rental.toy_ids).await?;
    Ok((company, customer, rental, toys))
}

#[instrument(skip(state))]
pub async fn budget(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let (company, customer, rental, toys) =
        load_rental_bundle(&state, id).await.map_err(doc_err)?;
    let doc = RentalDocument::build(company, customer, &rental, &toys);
    let html = render_budget(&doc).map_err(doc_err)?;
    Ok(Html(html))
}

#[instrument(skip(state))]
pub async fn contract(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let (company, customer, rental, toys) =
        load_rental_bundle(&state, id).await.map_err(doc_err)?;
    let doc = RentalDocument::build(company, customer, &rental, &toys);
    let html = render_contract(&doc).map_err(doc_err)?;
    Ok(Html(html))
}

#[instrument(skip(state))]
pub async fn receipt(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let (company, customer, rental, toys) =
        load_rental_bundle(&state, id).await.map_err(doc_err)?;
    let doc = RentalDocument::build(company, customer, &rental, &toys);
    let html = render_receipt(&doc).map_err(doc_err)?;
    Ok(Html(html))
}

#[instrument(skip(state))]
pub async fn whatsapp_link(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WhatsAppLink>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Rentals)?;

    let (company, customer, rental, toys) =
        load_rental_bundle(&state, id).await.map_err(doc_err)?;
    Ok(Json(link_for_rental(&company, &customer, &rental, &toys)))
}

#[instrument(skip(state))]
pub async fn customers_report(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
) -> Result<Html<String>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Reports)?;

    let company = CompanySettings::get(&state.db)
        .await
        .map_err(|e| doc_err(DocumentError::Db(e)))?
        .ok_or_else(|| doc_err(DocumentError::SettingsMissing))?;
    let customers = Customer::list(&state.db, None)
        .await
        .map_err(|e| doc_err(DocumentError::Db(e)))?;

    let html = render_customers_report(&company, &customers).map_err(doc_err)?;
    Ok(Html(html))
}

#[instrument(skip(state))]
pub async fn financial_report(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Query(params): Query<LedgerParams>,
) -> Result<Html<String>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Reports)?;

    let company = CompanySettings::get(&state.db)
        .await
        .map_err(|e| doc_err(DocumentError::Db(e)))?
        .ok_or_else(|| doc_err(DocumentError::SettingsMissing))?;
    let transactions = Transaction::list(&state.db, params.from, params.to)
        .await
        .map_err(|e| doc_err(DocumentError::Db(e)))?;
    let summary = summarize(&transactions);

    let period = match (params.from, params.to) {
        (Some(from), Some(to)) => format!("{} - {}", from, to),
        (Some(from), None) => format!("desde {}", from),
        (None, Some(to)) => format!("ate {}", to),
        (None, None) => "todo o periodo".to_string(),
    };

    let html =
        render_financial_report(&company, &transactions, &summary, &period).map_err(doc_err)?;
    Ok(Html(html))
}
