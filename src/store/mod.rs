//! Component store: the remote `components` table the editor mirrors.
//!
//! DESIGN
//! ======
//! The orchestrator only sees `ComponentStore`. `main` picks a backend from
//! configuration and injects it as `Arc<dyn ComponentStore>`:
//! - `postgres`: direct SQLx access to the table.
//! - `rest`: a PostgREST-style table API over HTTP.
//! - `memory`: process-local rows for development and tests.
//!
//! Rows may carry `position` as a JSON object or as a string holding the
//! same JSON; `decode_position` accepts both.

pub mod memory;
pub mod postgres;
pub mod rest;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::editor::widget::{Instance, InstanceId, NewInstance, Position, Properties, WidgetKind};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("component not found: {0}")]
    NotFound(InstanceId),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("store responded with status {status}")]
    Api { status: u16, body: String },
    #[error("malformed row: {0}")]
    Decode(String),
    #[error("store misconfigured: {0}")]
    Config(String),
}

// =============================================================================
// TRAIT
// =============================================================================

/// CRUD contract of the remote component table. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ComponentStore: Send + Sync {
    /// All instances, oldest first.
    async fn list(&self) -> Result<Vec<Instance>, StoreError>;

    /// Insert a row and return it with its store-assigned id.
    async fn create(&self, new: NewInstance) -> Result<Instance, StoreError>;

    /// Replace the property bag of `id`.
    async fn update(&self, id: &str, properties: &Properties) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Build the configured store backend.
///
/// # Errors
///
/// Returns an error if the database cannot be reached, migrations fail, or
/// the REST client cannot be built.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn ComponentStore>, StoreError> {
    match &config.store {
        StoreBackend::Postgres { database_url, max_connections } => {
            let pool = crate::db::init_pool(database_url, *max_connections).await?;
            Ok(Arc::new(postgres::PgStore::new(pool)))
        }
        StoreBackend::Rest(rest_config) => Ok(Arc::new(rest::RestStore::new(rest_config)?)),
        StoreBackend::Memory => Ok(Arc::new(memory::MemoryStore::new())),
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode a stored position given either as `{x, y}` or as a string
/// containing that object.
///
/// # Errors
///
/// Returns `Decode` if the value is neither form or lacks numeric `x`/`y`.
pub fn decode_position(value: &serde_json::Value) -> Result<Position, StoreError> {
    match value {
        serde_json::Value::String(encoded) => {
            let inner: serde_json::Value =
                serde_json::from_str(encoded).map_err(|e| StoreError::Decode(format!("position: {e}")))?;
            if inner.is_string() {
                return Err(StoreError::Decode("position: doubly encoded string".into()));
            }
            decode_position(&inner)
        }
        serde_json::Value::Object(_) => {
            serde_json::from_value(value.clone()).map_err(|e| StoreError::Decode(format!("position: {e}")))
        }
        other => Err(StoreError::Decode(format!("position: unexpected {other}"))),
    }
}

/// Decode a stored property bag. `null` is an empty bag.
///
/// # Errors
///
/// Returns `Decode` if the value is not an object or has mistyped fields.
pub fn decode_properties(value: &serde_json::Value) -> Result<Properties, StoreError> {
    if value.is_null() {
        return Ok(Properties::default());
    }
    serde_json::from_value(value.clone()).map_err(|e| StoreError::Decode(format!("properties: {e}")))
}

/// Assemble an instance from the raw column values of one row.
///
/// # Errors
///
/// Returns `Decode` if `position` or `properties` are malformed.
pub fn instance_from_columns(
    id: String,
    kind: &str,
    position: &serde_json::Value,
    properties: &serde_json::Value,
) -> Result<Instance, StoreError> {
    Ok(Instance {
        id,
        kind: WidgetKind::parse(kind),
        position: decode_position(position)?,
        properties: decode_properties(properties)?,
    })
}

/// Decode one JSON row (`{id, type, position, properties, ...}`).
///
/// # Errors
///
/// Returns `Decode` if a required column is missing or malformed.
pub fn instance_from_row(row: &serde_json::Value) -> Result<Instance, StoreError> {
    let id = match row.get("id") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => return Err(StoreError::Decode("row without id".into())),
    };
    let kind = row
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| StoreError::Decode(format!("row {id} without type")))?;
    let position = row
        .get("position")
        .ok_or_else(|| StoreError::Decode(format!("row {id} without position")))?;
    let properties = row.get("properties").unwrap_or(&serde_json::Value::Null);
    instance_from_columns(id, kind, position, properties)
}
