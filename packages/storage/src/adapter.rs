//! # Persistence Adapter
//!
//! Loads and saves whole designs through a [`DesignStore`].
//!
//! - Load sanitizes every color and the background before handing the
//!   design back; the caller swaps it into the session in one step.
//! - Save sanitizes, serializes to the wire shape and creates the design
//!   the first time (no identity yet) or updates it afterwards.
//! - The identity is held under a lock for the whole save, so two saves
//!   racing on a fresh design cannot both create.

use crate::errors::{PersistenceError, PersistenceResult, StoreError};
use crate::routes::{load_request, save_request, DesignKey};
use crate::store::DesignStore;
use crate::wire::PersistedDesign;
use artboard_model::{Design, Face};
use artboard_render::render_thumbnail;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Longest side of the preview sent with every save
pub const PREVIEW_SIZE: f64 = 240.0;

pub struct PersistenceAdapter {
    store: Arc<dyn DesignStore>,
    identity: Mutex<Option<String>>,
    preview_size: Option<f64>,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn DesignStore>) -> Self {
        Self {
            store,
            identity: Mutex::new(None),
            preview_size: Some(PREVIEW_SIZE),
        }
    }

    /// Start from a known backend identity, so the first save updates
    pub fn with_identity(self, design_id: Option<String>) -> Self {
        Self {
            identity: Mutex::new(design_id),
            ..self
        }
    }

    /// `None` disables the preview part
    pub fn with_preview_size(mut self, size: Option<f64>) -> Self {
        self.preview_size = size;
        self
    }

    pub fn store(&self) -> &Arc<dyn DesignStore> {
        &self.store
    }

    pub async fn identity(&self) -> Option<String> {
        self.identity.lock().await.clone()
    }

    #[tracing::instrument(skip(self))]
    pub async fn load(&self, key: &DesignKey) -> PersistenceResult<Design> {
        let persisted = self.store.send(&load_request(key)).await?;
        let design = persisted.into_design();

        *self.identity.lock().await = design.meta.design_id.clone();
        tracing::info!(
            design_id = ?design.meta.design_id,
            elements = design.elements.len(),
            "design loaded"
        );
        Ok(design)
    }

    /// Save the design; returns its backend id
    #[tracing::instrument(skip(self, design), fields(project = %design.meta.project_name))]
    pub async fn save(&self, design: &Design) -> PersistenceResult<String> {
        let mut identity = self.identity.lock().await;

        let mut payload = PersistedDesign::from_design(design);
        payload.id = identity.clone();
        let preview = self.preview(design);

        let request = save_request(identity.as_deref(), &payload, preview).map_err(StoreError::from)?;
        let stored = self.store.send(&request).await?;

        let id = stored
            .id
            .or_else(|| identity.clone())
            .ok_or_else(|| PersistenceError::Malformed("store returned no id".to_string()))?;

        if identity.is_none() {
            tracing::info!(%id, "design created");
        }
        *identity = Some(id.clone());
        tracing::info!(%id, "design saved");
        Ok(id)
    }

    fn preview(&self, design: &Design) -> Option<String> {
        let size = self.preview_size?;
        let node = render_thumbnail(design, Face::Front, size);
        serde_json::to_string(&node).ok()
    }
}
