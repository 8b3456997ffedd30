use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub is_company: bool,
    /// Tax id (CPF/CNPJ style); free-form string.
    pub document: String,
    pub created_at: OffsetDateTime,
}

/// Case-insensitive substring match on name or document. Pure so the filter
/// semantics are testable without a database; the SQL path mirrors it.
pub fn matches_search(c: &Customer, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    c.name.to_lowercase().contains(&needle) || c.document.to_lowercase().contains(&needle)
}

impl Customer {
    pub async fn list(db: &PgPool, search: Option<&str>) -> anyhow::Result<Vec<Customer>> {
        let rows = match search {
            Some(needle) if !needle.trim().is_empty() => {
                let pattern = format!("%{}%", needle.trim());
                sqlx::query_as::<_, Customer>(
                    r#"
                    SELECT id, name, phone, address, is_company, document, created_at
                    FROM customers
                    WHERE name ILIKE $1 OR document ILIKE $1
                    ORDER BY name ASC
                    "#,
                )
                .bind(pattern)
                .fetch_all(db)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Customer>(
                    r#"
                    SELECT id, name, phone, address, is_company, document, created_at
                    FROM customers
                    ORDER BY name ASC
                    "#,
                )
                .fetch_all(db)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, address, is_company, document, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(customer)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        phone: &str,
        address: &str,
        is_company: bool,
        document: &str,
    ) -> anyhow::Result<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, phone, address, is_company, document)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, phone, address, is_company, document, created_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(address)
        .bind(is_company)
        .bind(document)
        .fetch_one(db)
        .await?;
        Ok(customer)
    }

    pub async fn update(db: &PgPool, customer: &Customer) -> anyhow::Result<Customer> {
        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, phone = $3, address = $4, is_company = $5, document = $6
            WHERE id = $1
            RETURNING id, name, phone, address, is_company, document, created_at
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.is_company)
        .bind(&customer.document)
        .fetch_one(db)
        .await?;
        Ok(updated)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, document: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: "11 99999-0000".into(),
            address: "Somewhere 123".into(),
            is_company: false,
            document: document.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn search_matches_name_case_insensitive() {
        let c = customer("Maria Silva", "123.456.789-00");
        assert!(matches_search(&c, "maria"));
        assert!(matches_search(&c, "SILVA"));
        assert!(!matches_search(&c, "joao"));
    }

    #[test]
    fn search_matches_document() {
        let c = customer("Maria Silva", "123.456.789-00");
        assert!(matches_search(&c, "456.789"));
        assert!(!matches_search(&c, "999"));
    }

    #[test]
    fn search_returns_matching_subset_only() {
        let all = vec![
            customer("Maria Silva", "111"),
            customer("Joao Souza", "222"),
            customer("Ana Maria", "333"),
        ];
        let hits: Vec<_> = all.iter().filter(|c| matches_search(c, "maria")).collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|c| c.name.to_lowercase().contains("maria")));
    }
}
