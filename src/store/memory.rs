//! In-process component store. Rows live for the lifetime of the process.

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ComponentStore, StoreError};
use crate::editor::widget::{Instance, NewInstance, Properties};

/// Insertion-ordered rows; insertion order stands in for `created_at`.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Instance>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `rows`, e.g. fixtures that already have ids.
    #[cfg(test)]
    #[must_use]
    pub fn with_rows(rows: Vec<Instance>) -> Self {
        Self { rows: RwLock::new(rows) }
    }
}

#[async_trait::async_trait]
impl ComponentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Instance>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn create(&self, new: NewInstance) -> Result<Instance, StoreError> {
        let instance = new.with_id(Uuid::new_v4().to_string());
        self.rows.write().await.push(instance.clone());
        Ok(instance)
    }

    async fn update(&self, id: &str, properties: &Properties) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        row.properties = properties.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound(id.to_owned()));
        }
        Ok(())
    }
}
