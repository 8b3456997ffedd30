use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "toy_status", rename_all = "lowercase")]
#[serde(rename_all = "PascalCase")]
pub enum ToyStatus {
    Available,
    Reserved,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Toy {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub size: Option<String>,
    pub status: ToyStatus,
    pub image_keys: Vec<String>,
    pub created_at: OffsetDateTime,
}

impl Toy {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Toy>> {
        let rows = sqlx::query_as::<_, Toy>(
            r#"
            SELECT id, name, category, price, quantity, size, status, image_keys, created_at
            FROM toys
            ORDER BY name ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Toy>> {
        let toy = sqlx::query_as::<_, Toy>(
            r#"
            SELECT id, name, category, price, quantity, size, status, image_keys, created_at
            FROM toys
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(toy)
    }

    pub async fn find_by_ids(db: &PgPool, ids: &[Uuid]) -> anyhow::Result<Vec<Toy>> {
        let rows = sqlx::query_as::<_, Toy>(
            r#"
            SELECT id, name, category, price, quantity, size, status, image_keys, created_at
            FROM toys
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        category: &str,
        price: f64,
        quantity: i32,
        size: Option<&str>,
        status: ToyStatus,
    ) -> anyhow::Result<Toy> {
        let toy = sqlx::query_as::<_, Toy>(
            r#"
            INSERT INTO toys (name, category, price, quantity, size, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, category, price, quantity, size, status, image_keys, created_at
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(quantity)
        .bind(size)
        .bind(status)
        .fetch_one(db)
        .await?;
        Ok(toy)
    }

    pub async fn update(db: &PgPool, toy: &Toy) -> anyhow::Result<Toy> {
        let updated = sqlx::query_as::<_, Toy>(
            r#"
            UPDATE toys
            SET name = $2, category = $3, price = $4, quantity = $5,
                size = $6, status = $7, image_keys = $8
            WHERE id = $1
            RETURNING id, name, category, price, quantity, size, status, image_keys, created_at
            "#,
        )
        .bind(toy.id)
        .bind(&toy.name)
        .bind(&toy.category)
        .bind(toy.price)
        .bind(toy.quantity)
        .bind(&toy.size)
        .bind(toy.status)
        .bind(&toy.image_keys)
        .fetch_one(db)
        .await?;
        Ok(updated)
    }

    /// Append storage keys to the toy's image list.
    pub async fn append_image_keys(db: &PgPool, id: Uuid, keys: &[String]) -> anyhow::Result<()> {
        sqlx::query("UPDATE toys SET image_keys = image_keys || $2 WHERE id = $1")
            .bind(id)
            .bind(keys)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM toys WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
