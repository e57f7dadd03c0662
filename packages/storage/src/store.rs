//! Design stores: anything that can answer a [`StoreRequest`].
//!
//! An HTTP client would forward the request as-is; the stores here
//! interpret it locally.

use crate::errors::{StoreError, StoreResult};
use crate::routes::{DesignKey, Route, StoreRequest};
use crate::wire::{Envelope, PersistedDesign};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[async_trait]
pub trait DesignStore: Send + Sync {
    /// Execute a request; returns the stored document with its `_id` set
    async fn send(&self, request: &StoreRequest) -> StoreResult<PersistedDesign>;
}

/// JSON documents on disk, one `<id>.json` per design
pub struct FileDesignStore {
    dir: PathBuf,
    /// Serializes writers so that id allocation cannot race
    write_lock: Mutex<()>,
}

impl FileDesignStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn design_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    pub fn preview_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.preview.json", id))
    }

    async fn read(&self, path: &Path) -> StoreResult<PersistedDesign> {
        let text = tokio::fs::read_to_string(path).await?;
        let envelope: Envelope<PersistedDesign> = serde_json::from_str(&text)?;
        Ok(envelope.data)
    }

    async fn write(&self, id: &str, design: &PersistedDesign, preview: Option<&str>) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(&Envelope::new(design))?;
        tokio::fs::write(self.design_path(id), json).await?;
        if let Some(preview) = preview {
            tokio::fs::write(self.preview_path(id), preview).await?;
        }
        Ok(())
    }

    async fn fetch(&self, key: &DesignKey) -> StoreResult<PersistedDesign> {
        match key {
            DesignKey::Design(id) => {
                let path = self.design_path(id);
                if !tokio::fs::try_exists(&path).await? {
                    return Err(StoreError::NotFound(key.to_string()));
                }
                let mut design = self.read(&path).await?;
                design.id.get_or_insert_with(|| id.clone());
                Ok(design)
            }
            DesignKey::Product(product_id) => {
                if !tokio::fs::try_exists(&self.dir).await? {
                    return Err(StoreError::NotFound(key.to_string()));
                }
                let mut entries = tokio::fs::read_dir(&self.dir).await?;
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    let Some(stem) = design_file_stem(&path) else {
                        continue;
                    };
                    match self.read(&path).await {
                        Ok(mut design) if design.product_id.as_deref() == Some(product_id) => {
                            design.id.get_or_insert_with(|| stem.to_string());
                            return Ok(design);
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!(path = %path.display(), "skipping unreadable design: {}", e),
                    }
                }
                Err(StoreError::NotFound(key.to_string()))
            }
        }
    }

    async fn allocate_id(&self) -> StoreResult<String> {
        let base = chrono::Utc::now().format("%Y%m%d%H%M%S%3f").to_string();
        let mut candidate = base.clone();
        let mut suffix = 1;
        while tokio::fs::try_exists(self.design_path(&candidate)).await? {
            suffix += 1;
            candidate = format!("{}-{}", base, suffix);
        }
        Ok(candidate)
    }
}

/// `<id>` for `<id>.json`, skipping preview files
fn design_file_stem(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".json")?;
    if stem.ends_with(".preview") {
        return None;
    }
    Some(stem)
}

#[async_trait]
impl DesignStore for FileDesignStore {
    async fn send(&self, request: &StoreRequest) -> StoreResult<PersistedDesign> {
        match Route::resolve(request)? {
            Route::Fetch(key) => self.fetch(&key).await,
            Route::Create => {
                let _guard = self.write_lock.lock().await;
                let id = self.allocate_id().await?;
                let mut design = request.design()?;
                design.id = Some(id.clone());
                self.write(&id, &design, request.preview()).await?;
                tracing::info!(%id, "design created");
                Ok(design)
            }
            Route::Update(id) => {
                let _guard = self.write_lock.lock().await;
                if !tokio::fs::try_exists(self.design_path(&id)).await? {
                    return Err(StoreError::NotFound(format!("design {}", id)));
                }
                let mut design = request.design()?;
                design.id = Some(id.clone());
                self.write(&id, &design, request.preview()).await?;
                tracing::info!(%id, "design updated");
                Ok(design)
            }
        }
    }
}

/// In-process store with failure injection, for tests and dry runs
#[derive(Default)]
pub struct MemoryDesignStore {
    designs: Mutex<HashMap<String, PersistedDesign>>,
    previews: Mutex<HashMap<String, String>>,
    log: Mutex<Vec<StoreRequest>>,
    next_id: AtomicUsize,
    /// Number of upcoming writes that fail with `Unavailable`
    failing_writes: AtomicUsize,
    write_delay: Mutex<Option<Duration>>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, id: impl Into<String>, mut design: PersistedDesign) {
        let id = id.into();
        design.id = Some(id.clone());
        self.designs.lock().await.insert(id, design);
    }

    pub async fn get(&self, id: &str) -> Option<PersistedDesign> {
        self.designs.lock().await.get(id).cloned()
    }

    pub async fn preview(&self, id: &str) -> Option<String> {
        self.previews.lock().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.designs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.designs.lock().await.is_empty()
    }

    /// Every request received, oldest first
    pub async fn requests(&self) -> Vec<StoreRequest> {
        self.log.lock().await.clone()
    }

    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Simulate a slow backend for writes
    pub async fn set_write_delay(&self, delay: Option<Duration>) {
        *self.write_delay.lock().await = delay;
    }

    fn take_failure(&self) -> bool {
        self.failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    async fn store(&self, id: String, request: &StoreRequest) -> StoreResult<PersistedDesign> {
        let delay = *self.write_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.take_failure() {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }

        let mut design = request.design()?;
        design.id = Some(id.clone());
        if let Some(preview) = request.preview() {
            self.previews.lock().await.insert(id.clone(), preview.to_string());
        }
        self.designs.lock().await.insert(id, design.clone());
        Ok(design)
    }
}

#[async_trait]
impl DesignStore for MemoryDesignStore {
    async fn send(&self, request: &StoreRequest) -> StoreResult<PersistedDesign> {
        self.log.lock().await.push(request.clone());

        match Route::resolve(request)? {
            Route::Fetch(key) => {
                let designs = self.designs.lock().await;
                let found = match &key {
                    DesignKey::Design(id) => designs.get(id),
                    DesignKey::Product(product_id) => designs
                        .values()
                        .find(|d| d.product_id.as_deref() == Some(product_id.as_str())),
                };
                found.cloned().ok_or_else(|| StoreError::NotFound(key.to_string()))
            }
            Route::Create => {
                let id = format!("design-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
                self.store(id, request).await
            }
            Route::Update(id) => {
                if !self.designs.lock().await.contains_key(&id) {
                    return Err(StoreError::NotFound(format!("design {}", id)));
                }
                self.store(id, request).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{load_request, save_request};
    use artboard_model::{CanvasState, Design};

    fn persisted(name: &str) -> PersistedDesign {
        PersistedDesign::from_design(&Design::new(name, CanvasState::default()))
    }

    #[tokio::test]
    async fn test_memory_create_then_fetch() {
        let store = MemoryDesignStore::new();
        let created = store
            .send(&save_request(None, &persisted("mem"), None).unwrap())
            .await
            .unwrap();
        let id = created.id.clone().unwrap();

        let fetched = store
            .send(&load_request(&DesignKey::Design(id)))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_memory_injected_failure() {
        let store = MemoryDesignStore::new();
        store.fail_next_writes(1);

        let request = save_request(None, &persisted("mem"), None).unwrap();
        assert!(matches!(store.send(&request).await, Err(StoreError::Unavailable(_))));
        assert!(store.send(&request).await.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryDesignStore::new();
        let request = save_request(Some("nope"), &persisted("mem"), None).unwrap();
        assert!(matches!(store.send(&request).await, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_design_file_stem() {
        assert_eq!(design_file_stem(Path::new("/a/b/x1.json")), Some("x1"));
        assert_eq!(design_file_stem(Path::new("/a/b/x1.preview.json")), None);
        assert_eq!(design_file_stem(Path::new("/a/b/notes.txt")), None);
    }
}
