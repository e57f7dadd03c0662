//! An [`EditSession`] wired to a [`SaveScheduler`].
//!
//! Every edit that bumps the session revision triggers a debounced save of
//! the whole design. Loads replace the session state without saving it back.

use crate::errors::PersistenceResult;
use crate::routes::DesignKey;
use crate::scheduler::{SaveEvent, SaveScheduler};
use artboard_editor::EditSession;

pub struct AutosaveSession {
    session: EditSession,
    scheduler: SaveScheduler,
    /// Revision last handed to the scheduler
    scheduled_revision: u64,
}

impl AutosaveSession {
    pub fn new(session: EditSession, scheduler: SaveScheduler) -> Self {
        let scheduled_revision = session.revision();
        Self {
            session,
            scheduler,
            scheduled_revision,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn scheduler(&self) -> &SaveScheduler {
        &self.scheduler
    }

    /// Run an edit; schedules a save if it changed anything persistent
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut EditSession) -> R) -> R {
        let result = f(&mut self.session);
        if self.session.revision() != self.scheduled_revision {
            self.scheduled_revision = self.session.revision();
            self.scheduler.trigger(self.session.design().clone());
        }
        result
    }

    /// Load a design and swap it in. On error the session is untouched.
    pub async fn load(&mut self, key: &DesignKey) -> PersistenceResult<()> {
        let design = self.scheduler.adapter().load(key).await?;
        self.scheduler.abandon();
        self.session.replace_design(design);
        self.scheduled_revision = self.session.revision();
        Ok(())
    }

    /// Send any pending save now and wait for outstanding ones
    pub async fn flush(&mut self) -> Option<SaveEvent> {
        let event = self.scheduler.flush().await;
        if let Some(id) = self.scheduler.adapter().identity().await {
            self.session.set_design_id(id);
        }
        event
    }

    /// Teardown without saving what is pending
    pub fn abandon(mut self) -> EditSession {
        self.scheduler.abandon();
        self.session
    }
}
