//! # Debounced Saves
//!
//! Each [`SaveScheduler::trigger`] cancels the pending save and schedules a
//! new one after the quiet period, so only the latest design is sent.
//!
//! ```text
//! trigger ──▶ [ sleep(delay) ] ──▶ spawn(save) ──▶ SaveEvent
//!                   ▲                   │
//!     next trigger aborts here     never aborted
//! ```
//!
//! Once the quiet period has elapsed the save runs on its own task, so a
//! later trigger, `abandon` or drop cannot cut it off mid-request.

use crate::adapter::PersistenceAdapter;
use artboard_model::Design;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Outcome of a save, delivered as a transient notification
#[derive(Debug, Clone, PartialEq)]
pub enum SaveEvent {
    Saved { design_id: String, at: DateTime<Utc> },
    Failed { message: String, at: DateTime<Utc> },
}

impl SaveEvent {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveEvent::Saved { .. })
    }
}

struct Pending {
    design: Design,
    /// Set once the quiet period is over and the save has been handed off
    fired: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

pub struct SaveScheduler {
    adapter: Arc<PersistenceAdapter>,
    delay: Duration,
    pending: Option<Pending>,
    /// Saves already past the quiet period
    in_flight: Vec<JoinHandle<()>>,
    events: mpsc::UnboundedSender<SaveEvent>,
}

impl SaveScheduler {
    pub fn new(
        adapter: Arc<PersistenceAdapter>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SaveEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            adapter,
            delay,
            pending: None,
            in_flight: Vec::new(),
            events,
        };
        (scheduler, receiver)
    }

    pub fn adapter(&self) -> &Arc<PersistenceAdapter> {
        &self.adapter
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a save is waiting out its quiet period
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |p| !p.fired.load(Ordering::SeqCst))
    }

    /// Schedule a save of `design`, replacing any save not yet sent
    pub fn trigger(&mut self, design: Design) {
        self.cancel_pending();
        self.in_flight.retain(|handle| !handle.is_finished());

        let fired = Arc::new(AtomicBool::new(false));
        let handle = {
            let adapter = self.adapter.clone();
            let events = self.events.clone();
            let fired = fired.clone();
            let delay = self.delay;
            let design = design.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                fired.store(true, Ordering::SeqCst);
                let save = tokio::spawn(save_and_report(adapter, design, events));
                // Dropping this task detaches `save` rather than aborting it
                let _ = save.await;
            })
        };

        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "save scheduled");
        self.pending = Some(Pending {
            design,
            fired,
            handle,
        });
    }

    /// Send the pending design now and wait for every outstanding save
    pub async fn flush(&mut self) -> Option<SaveEvent> {
        let mut event = None;

        if let Some(pending) = self.pending.take() {
            if pending.fired.load(Ordering::SeqCst) {
                self.in_flight.push(pending.handle);
            } else {
                pending.handle.abort();
                event = Some(save_now(&self.adapter, &pending.design).await);
                if let Some(event) = &event {
                    let _ = self.events.send(event.clone());
                }
            }
        }

        for handle in self.in_flight.drain(..) {
            let _ = handle.await;
        }
        event
    }

    /// Drop the pending save, if any. Saves already sent keep running.
    pub fn abandon(&mut self) {
        if self.cancel_pending() {
            tracing::debug!("pending save abandoned");
        }
    }

    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) if pending.fired.load(Ordering::SeqCst) => {
                self.in_flight.push(pending.handle);
                false
            }
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn save_now(adapter: &PersistenceAdapter, design: &Design) -> SaveEvent {
    match adapter.save(design).await {
        Ok(design_id) => SaveEvent::Saved {
            design_id,
            at: Utc::now(),
        },
        Err(e) => {
            tracing::error!("save failed: {}", e);
            SaveEvent::Failed {
                message: e.to_string(),
                at: Utc::now(),
            }
        }
    }
}

async fn save_and_report(
    adapter: Arc<PersistenceAdapter>,
    design: Design,
    events: mpsc::UnboundedSender<SaveEvent>,
) {
    let event = save_now(&adapter, &design).await;
    // Receiver gone means nobody is listening for notifications
    let _ = events.send(event);
}
