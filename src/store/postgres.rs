//! Postgres component store over the `components` table.
//!
//! `position` and `properties` are JSONB. Older rows may hold `position` as
//! a JSON string; decoding goes through `decode_position` either way.

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;

use sqlx::PgPool;
use uuid::Uuid;

use super::{ComponentStore, StoreError, instance_from_columns};
use crate::editor::widget::{Instance, NewInstance, Properties};

type ComponentRow = (Uuid, String, serde_json::Value, serde_json::Value);

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Ids that are not UUIDs cannot exist in the table.
fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::NotFound(id.to_owned()))
}

fn row_to_instance((id, kind, position, properties): ComponentRow) -> Result<Instance, StoreError> {
    instance_from_columns(id.to_string(), &kind, &position, &properties)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl ComponentStore for PgStore {
    async fn list(&self) -> Result<Vec<Instance>, StoreError> {
        let rows = sqlx::query_as::<_, ComponentRow>(
            "SELECT id, type, position, properties FROM components ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_instance).collect()
    }

    async fn create(&self, new: NewInstance) -> Result<Instance, StoreError> {
        let row = sqlx::query_as::<_, ComponentRow>(
            "INSERT INTO components (type, position, properties) VALUES ($1, $2, $3) \
             RETURNING id, type, position, properties",
        )
        .bind(new.kind.as_str())
        .bind(to_json(&new.position)?)
        .bind(to_json(&new.properties)?)
        .fetch_one(&self.pool)
        .await?;

        row_to_instance(row)
    }

    async fn update(&self, id: &str, properties: &Properties) -> Result<(), StoreError> {
        let uuid = parse_id(id)?;
        let result = sqlx::query("UPDATE components SET properties = $2 WHERE id = $1")
            .bind(uuid)
            .bind(to_json(properties)?)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_owned()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let uuid = parse_id(id)?;
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_owned()));
        }
        Ok(())
    }
}
