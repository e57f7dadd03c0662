//! # Artboard Storage
//!
//! Persistence for artboard designs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ AutosaveSession: EditSession + scheduler    │
//! └─────────────────────────────────────────────┘
//!                     ↓ trigger (debounced)
//! ┌─────────────────────────────────────────────┐
//! │ SaveScheduler: cancel + reschedule, events  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ PersistenceAdapter: sanitize, create/update │
//! │  wire: PersistedDesign (camelCase JSON)     │
//! │  routes: GET/POST/PATCH request descriptors │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ DesignStore: file system, memory, or HTTP   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Failure handling
//!
//! - Load errors are returned so the caller can redirect
//! - Save errors are logged and reported as a [`SaveEvent::Failed`];
//!   the in-memory design is never rolled back

pub mod adapter;
pub mod autosave;
mod errors;
pub mod routes;
pub mod scheduler;
pub mod store;
pub mod wire;

pub use adapter::PersistenceAdapter;
pub use autosave::AutosaveSession;
pub use errors::{PersistenceError, PersistenceResult, StoreError, StoreResult};
pub use routes::{DesignKey, Method, StoreRequest};
pub use scheduler::{SaveEvent, SaveScheduler, DEFAULT_SAVE_DEBOUNCE};
pub use store::{DesignStore, FileDesignStore, MemoryDesignStore};
pub use wire::{Envelope, PersistedDesign, WireElement};
