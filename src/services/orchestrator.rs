//! Orchestrator: owns the instance list and selection, mediates the store.
//!
//! DESIGN
//! ======
//! Every mutation is one store round trip followed by one local update. The
//! workspace lock is never held across the round trip: the store call runs
//! unlocked, then the result is applied under a single write guard so
//! renderers always see a consistent list + selection pair. Two mutations in
//! flight at once each apply when they complete, so interleaved adds land in
//! completion order.
//!
//! ERROR HANDLING
//! ==============
//! A failed store call leaves local state untouched, emits an error toast,
//! and logs the detail. There are no retries; the user repeats the action.
//! The one exception is a delete the store answers with `NotFound`: the row
//! is already gone remotely, so the delete still completes locally.

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::editor::widget::{Instance, InstanceId, NewInstance, Properties};
use crate::services::notify::{Notifier, Toast};
use crate::store::{ComponentStore, StoreError};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("component not in workspace: {0}")]
    NotInWorkspace(InstanceId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Authoritative editor state: ordered, id-unique list plus selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workspace {
    pub instances: Vec<Instance>,
    pub selected: Option<InstanceId>,
}

impl Workspace {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Instance> {
        self.instances.iter().find(|inst| inst.id == id)
    }

    #[must_use]
    pub fn selected_instance(&self) -> Option<&Instance> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }
}

pub struct Orchestrator {
    store: Arc<dyn ComponentStore>,
    notifier: Arc<dyn Notifier>,
    workspace: RwLock<Workspace>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(store: Arc<dyn ComponentStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier, workspace: RwLock::new(Workspace::default()) }
    }

    /// Consistent copy of list and selection for rendering.
    pub async fn snapshot(&self) -> Workspace {
        self.workspace.read().await.clone()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Replace the local list with the store's rows, oldest first.
    ///
    /// # Errors
    ///
    /// Returns the store error; the list is left empty.
    pub async fn load(&self) -> Result<usize, EditorError> {
        match self.store.list().await {
            Ok(instances) => {
                let count = instances.len();
                let mut ws = self.workspace.write().await;
                ws.instances = dedup_by_id(instances);
                ws.selected = None;
                info!(count, "components loaded");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "load components failed");
                *self.workspace.write().await = Workspace::default();
                self.notifier.notify(Toast::error("Failed to load components"));
                Err(e.into())
            }
        }
    }

    /// Persist a new instance, append it, and select it.
    ///
    /// # Errors
    ///
    /// Returns the store error; local state is unchanged.
    pub async fn add(&self, new: NewInstance) -> Result<Instance, EditorError> {
        let kind = new.kind.clone();
        match self.store.create(new).await {
            Ok(created) => {
                let mut ws = self.workspace.write().await;
                if ws.get(&created.id).is_none() {
                    ws.instances.push(created.clone());
                }
                ws.selected = Some(created.id.clone());
                drop(ws);
                info!(id = %created.id, kind = %created.kind, "component added");
                self.notifier.notify(Toast::success("Component added successfully"));
                Ok(created)
            }
            Err(e) => {
                error!(error = %e, %kind, "add component failed");
                self.notifier.notify(Toast::error("Failed to add component"));
                Err(e.into())
            }
        }
    }

    /// Replace the full property bag of `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotInWorkspace` for unknown ids (no store call is made) or the
    /// store error; local state is unchanged on error.
    pub async fn update(&self, id: &str, properties: Properties) -> Result<Instance, EditorError> {
        if self.workspace.read().await.get(id).is_none() {
            return Err(EditorError::NotInWorkspace(id.to_owned()));
        }

        if let Err(e) = self.store.update(id, &properties).await {
            error!(error = %e, %id, "update properties failed");
            self.notifier.notify(Toast::error("Failed to update properties"));
            return Err(e.into());
        }

        let mut ws = self.workspace.write().await;
        let Some(entry) = ws.instances.iter_mut().find(|inst| inst.id == id) else {
            // Deleted while the update was in flight.
            return Err(EditorError::NotInWorkspace(id.to_owned()));
        };
        entry.properties = properties;
        let updated = entry.clone();
        drop(ws);

        self.notifier.notify(Toast::success("Properties updated successfully"));
        Ok(updated)
    }

    /// Delete `id` remotely and locally; clears the selection if it pointed there.
    /// A row the store no longer has counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotInWorkspace` for unknown ids or the store error; local
    /// state is unchanged on error.
    pub async fn delete(&self, id: &str) -> Result<(), EditorError> {
        if self.workspace.read().await.get(id).is_none() {
            return Err(EditorError::NotInWorkspace(id.to_owned()));
        }

        match self.store.delete(id).await {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => {
                warn!(%id, "component already gone from store; removing locally");
            }
            Err(e) => {
                error!(error = %e, %id, "delete component failed");
                self.notifier.notify(Toast::error("Failed to delete component"));
                return Err(e.into());
            }
        }

        let mut ws = self.workspace.write().await;
        ws.instances.retain(|inst| inst.id != id);
        if ws.selected.as_deref() == Some(id) {
            ws.selected = None;
        }
        drop(ws);

        info!(%id, "component deleted");
        self.notifier.notify(Toast::success("Component deleted successfully"));
        Ok(())
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Select `id` if it is in the list. Returns whether the selection changed
    /// to it.
    pub async fn select(&self, id: &str) -> bool {
        let mut ws = self.workspace.write().await;
        if ws.get(id).is_none() {
            return false;
        }
        ws.selected = Some(id.to_owned());
        true
    }

    pub async fn deselect(&self) {
        self.workspace.write().await.selected = None;
    }
}

/// Keep the first row for each id so the list stays id-unique.
fn dedup_by_id(instances: Vec<Instance>) -> Vec<Instance> {
    let mut seen = std::collections::HashSet::new();
    instances
        .into_iter()
        .filter(|inst| seen.insert(inst.id.clone()))
        .collect()
}
