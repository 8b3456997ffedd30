//! Printable HTML documents (budget, contract, receipt, reports) rendered
//! from tera templates. Clients rasterize to PDF themselves; the server only
//! guarantees that every referenced field is populated.

use axum::http::StatusCode;
use lazy_static::lazy_static;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use time::OffsetDateTime;

use crate::customers::repo::Customer;
use crate::finance::repo::Transaction;
use crate::finance::summary::FinanceSummary;
use crate::rentals::repo::Rental;
use crate::settings::repo::CompanySettings;
use crate::toys::repo::Toy;

lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = match Tera::new("templates/**/*") {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(error = %e, "template parsing failed");
                ::std::process::exit(1);
            }
        };
        tera.autoescape_on(vec![".html"]);
        tera
    };
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Rental not found")]
    RentalNotFound,
    #[error("Customer referenced by this rental no longer exists")]
    CustomerMissing,
    #[error("Company settings not configured")]
    SettingsMissing,
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

impl DocumentError {
    pub fn status(&self) -> StatusCode {
        match self {
            DocumentError::RentalNotFound
            | DocumentError::CustomerMissing
            | DocumentError::SettingsMissing => StatusCode::NOT_FOUND,
            DocumentError::Template(_) | DocumentError::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Everything a rental-scoped document template may reference.
#[derive(Debug, Serialize)]
pub struct RentalDocument {
    pub company: CompanySettings,
    pub customer: Customer,
    pub rental: RentalView,
    pub toys: Vec<ToyLine>,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct RentalView {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub total_value: String,
    pub entry_value: String,
    pub remaining_value: String,
    pub payment_method: String,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct ToyLine {
    pub name: String,
    pub category: String,
    pub size: String,
    pub price: String,
}

pub fn money(v: f64) -> String {
    format!("{:.2}", v)
}

impl RentalDocument {
    pub fn build(
        company: CompanySettings,
        customer: Customer,
        rental: &Rental,
        toys: &[Toy],
    ) -> Self {
        let lines = toys
            .iter()
            .map(|t| ToyLine {
                name: t.name.clone(),
                category: t.category.clone(),
                size: t.size.clone().unwrap_or_default(),
                price: money(t.price),
            })
            .collect();
        Self {
            company,
            customer,
            rental: RentalView {
                date: rental.date.to_string(),
                start_time: rental.start_time.to_string(),
                end_time: rental.end_time.to_string(),
                total_value: money(rental.total_value),
                entry_value: money(rental.entry_value),
                remaining_value: money(rental.total_value - rental.entry_value),
                payment_method: rental.payment_method.clone(),
                status: format!("{:?}", rental.status),
                notes: rental.notes.clone().unwrap_or_default(),
            },
            toys: lines,
            generated_at: OffsetDateTime::now_utc().date().to_string(),
        }
    }

    fn context(&self) -> Result<Context, DocumentError> {
        Ok(Context::from_serialize(self).map_err(DocumentError::Template)?)
    }
}

pub fn render_budget(doc: &RentalDocument) -> Result<String, DocumentError> {
    Ok(TEMPLATES.render("budget.html", &doc.context()?)?)
}

pub fn render_contract(doc: &RentalDocument) -> Result<String, DocumentError> {
    Ok(TEMPLATES.render("contract.html", &doc.context()?)?)
}

pub fn render_receipt(doc: &RentalDocument) -> Result<String, DocumentError> {
    Ok(TEMPLATES.render("receipt.html", &doc.context()?)?)
}

pub fn render_customers_report(
    company: &CompanySettings,
    customers: &[Customer],
) -> Result<String, DocumentError> {
    let mut ctx = Context::new();
    ctx.insert("company", company);
    ctx.insert("customers", customers);
    ctx.insert(
        "generated_at",
        &OffsetDateTime::now_utc().date().to_string(),
    );
    Ok(TEMPLATES.render("customers_report.html", &ctx)?)
}

pub fn render_financial_report(
    company: &CompanySettings,
    transactions: &[Transaction],
    summary: &FinanceSummary,
    period: &str,
) -> Result<String, DocumentError> {
    let mut ctx = Context::new();
    ctx.insert("company", company);
    ctx.insert("transactions", transactions);
    ctx.insert("summary", summary);
    ctx.insert("period", period);
    ctx.insert(
        "generated_at",
        &OffsetDateTime::now_utc().date().to_string(),
    );
    Ok(TEMPLATES.render("financial_report.html", &ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rentals::repo::RentalStatus;
    use crate::toys::repo::ToyStatus;
    use time::macros::{date, time};
    use uuid::Uuid;

    fn company() -> CompanySettings {
        CompanySettings {
            id: 1,
            name: "Festa Alegre Ltda".into(),
            phone: "11 4002-8922".into(),
            email: "contato@festaalegre.com".into(),
            address: "Rua das Festas 100".into(),
            document: "12.345.678/0001-00".into(),
            logo_url: None,
            contract_terms: "O locatario se responsabiliza pelos itens alugados.".into(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn customer() -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: "Maria Silva".into(),
            phone: "11 99999-0000".into(),
            address: "Av. Central 55".into(),
            is_company: false,
            document: "123.456.789-00".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn rental(toy_id: Uuid) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            date: date!(2026 - 09 - 12),
            start_time: time!(14:00),
            end_time: time!(18:00),
            toy_ids: vec![toy_id],
            total_value: 350.0,
            entry_value: 100.0,
            payment_method: "pix".into(),
            status: RentalStatus::Confirmed,
            notes: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn toy(id: Uuid) -> Toy {
        Toy {
            id,
            name: "Cama Elastica".into(),
            category: "jumpers".into(),
            price: 350.0,
            quantity: 2,
            size: Some("4m".into()),
            status: ToyStatus::Available,
            image_keys: vec![],
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn doc() -> RentalDocument {
        let toy_id = Uuid::new_v4();
        RentalDocument::build(company(), customer(), &rental(toy_id), &[toy(toy_id)])
    }

    #[test]
    fn budget_populates_customer_and_company_fields() {
        let html = render_budget(&doc()).expect("render budget");
        assert!(html.contains("Maria Silva"));
        assert!(html.contains("Festa Alegre Ltda"));
        assert!(html.contains("Cama Elastica"));
        assert!(html.contains("350.00"));
        assert!(html.contains("2026-09-12"));
    }

    #[test]
    fn contract_includes_boilerplate_and_documents() {
        let html = render_contract(&doc()).expect("render contract");
        assert!(html.contains("O locatario se responsabiliza"));
        assert!(html.contains("123.456.789-00"));
        assert!(html.contains("12.345.678/0001-00"));
    }

    #[test]
    fn receipt_shows_entry_and_remaining_values() {
        let html = render_receipt(&doc()).expect("render receipt");
        assert!(html.contains("100.00"));
        assert!(html.contains("250.00"));
    }

    #[test]
    fn customers_report_lists_every_customer() {
        let customers = vec![customer(), customer()];
        let html = render_customers_report(&company(), &customers).expect("render report");
        assert_eq!(html.matches("Maria Silva").count(), 2);
    }

    #[test]
    fn missing_references_surface_as_not_found() {
        assert_eq!(DocumentError::RentalNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(DocumentError::CustomerMissing.status(), StatusCode::NOT_FOUND);
        assert_eq!(DocumentError::SettingsMissing.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            DocumentError::Db(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn money_formats_two_decimals() {
        assert_eq!(money(350.0), "350.00");
        assert_eq!(money(99.999), "100.00");
    }
}
