use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "PascalCase")]
pub enum RentalStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub toy_ids: Vec<Uuid>,
    pub total_value: f64,
    pub entry_value: f64,
    pub payment_method: String,
    pub status: RentalStatus,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Rental {
    pub async fn list(db: &PgPool, date: Option<Date>) -> anyhow::Result<Vec<Rental>> {
        let rows = match date {
            Some(date) => {
                sqlx::query_as::<_, Rental>(
                    r#"
                    SELECT id, customer_id, date, start_time, end_time, toy_ids,
                           total_value, entry_value, payment_method, status, notes, created_at
                    FROM rentals
                    WHERE date = $1
                    ORDER BY date DESC, start_time ASC
                    "#,
                )
                .bind(date)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Rental>(
                    r#"
                    SELECT id, customer_id, date, start_time, end_time, toy_ids,
                           total_value, entry_value, payment_method, status, notes, created_at
                    FROM rentals
                    ORDER BY date DESC, start_time ASC
                    "#,
                )
                .fetch_all(db)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT id, customer_id, date, start_time, end_time, toy_ids,
                   total_value, entry_value, payment_method, status, notes, created_at
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(rental)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        customer_id: Uuid,
        date: Date,
        start_time: Time,
        end_time: Time,
        toy_ids: &[Uuid],
        total_value: f64,
        entry_value: f64,
        payment_method: &str,
        status: RentalStatus,
        notes: Option<&str>,
    ) -> anyhow::Result<Rental> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals
                (customer_id, date, start_time, end_time, toy_ids,
                 total_value, entry_value, payment_method, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, customer_id, date, start_time, end_time, toy_ids,
                      total_value, entry_value, payment_method, status, notes, created_at
            "#,
        )
        .bind(customer_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(toy_ids)
        .bind(total_value)
        .bind(entry_value)
        .bind(payment_method)
        .bind(status)
        .bind(notes)
        .fetch_one(db)
        .await?;
        Ok(rental)
    }

    pub async fn update(db: &PgPool, rental: &Rental) -> anyhow::Result<Rental> {
        let updated = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET customer_id = $2, date = $3, start_time = $4, end_time = $5,
                toy_ids = $6, total_value = $7, entry_value = $8,
                payment_method = $9, status = $10, notes = $11
            WHERE id = $1
            RETURNING id, customer_id, date, start_time, end_time, toy_ids,
                      total_value, entry_value, payment_method, status, notes, created_at
            "#,
        )
        .bind(rental.id)
        .bind(rental.customer_id)
        .bind(rental.date)
        .bind(rental.start_time)
        .bind(rental.end_time)
        .bind(&rental.toy_ids)
        .bind(rental.total_value)
        .bind(rental.entry_value)
        .bind(&rental.payment_method)
        .bind(rental.status)
        .bind(&rental.notes)
        .fetch_one(db)
        .await?;
        Ok(updated)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
