use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Singleton company record; the table is constrained to one row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanySettings {
    #[serde(skip_serializing)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub document: String,
    pub logo_url: Option<String>,
    /// Boilerplate inserted into rendered contracts.
    pub contract_terms: String,
    pub updated_at: OffsetDateTime,
}

impl CompanySettings {
    pub async fn get(db: &PgPool) -> anyhow::Result<Option<CompanySettings>> {
        let settings = sqlx::query_as::<_, CompanySettings>(
            r#"
            SELECT id, name, phone, email, address, document, logo_url, contract_terms, updated_at
            FROM company_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(db)
        .await?;
        Ok(settings)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        db: &PgPool,
        name: &str,
        phone: &str,
        email: &str,
        address: &str,
        document: &str,
        logo_url: Option<&str>,
        contract_terms: &str,
    ) -> anyhow::Result<CompanySettings> {
        let settings = sqlx::query_as::<_, CompanySettings>(
            r#"
            INSERT INTO company_settings (id, name, phone, email, address, document, logo_url, contract_terms, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, now())
            ON CONFLICT (id) DO UPDATE
            SET name = $1, phone = $2, email = $3, address = $4, document = $5,
                logo_url = $6, contract_terms = $7, updated_at = now()
            RETURNING id, name, phone, email, address, document, logo_url, contract_terms, updated_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .bind(document)
        .bind(logo_url)
        .bind(contract_terms)
        .fetch_one(db)
        .await?;
        Ok(settings)
    }
}
