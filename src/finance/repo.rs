use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "PascalCase")]
pub enum TransactionKind {
    Income,
    Expense,
    Extra,
}

/// A manually entered ledger line; independent from rentals.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub date: Date,
    pub description: String,
    pub value: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub created_at: OffsetDateTime,
}

impl Transaction {
    pub async fn list(
        db: &PgPool,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, date, description, value, kind, category, created_at
            FROM transactions
            WHERE ($1::date IS NULL OR date >= $1)
              AND ($2::date IS NULL OR date <= $2)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Transaction>> {
        let tx = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, date, description, value, kind, category, created_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(tx)
    }

    pub async fn create(
        db: &PgPool,
        date: Date,
        description: &str,
        value: f64,
        kind: TransactionKind,
        category: &str,
    ) -> anyhow::Result<Transaction> {
        let tx = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (date, description, value, kind, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, date, description, value, kind, category, created_at
            "#,
        )
        .bind(date)
        .bind(description)
        .bind(value)
        .bind(kind)
        .bind(category)
        .fetch_one(db)
        .await?;
        Ok(tx)
    }

    pub async fn update(db: &PgPool, tx: &Transaction) -> anyhow::Result<Transaction> {
        let updated = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET date = $2, description = $3, value = $4, kind = $5, category = $6
            WHERE id = $1
            RETURNING id, date, description, value, kind, category, created_at
            "#,
        )
        .bind(tx.id)
        .bind(tx.date)
        .bind(&tx.description)
        .bind(tx.value)
        .bind(tx.kind)
        .bind(&tx.category)
        .fetch_one(db)
        .await?;
        Ok(updated)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
