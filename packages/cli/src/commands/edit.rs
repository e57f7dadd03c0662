//! `artboard edit`: replay a JSON script of editor gestures against a design
//! and save the result through the debounced adapter.
//!
//! ```json
//! [
//!   { "cmd": "add", "element": { "type": "text", "content": "Hi", "x": 40, "y": 40 } },
//!   { "cmd": "key", "key": "ArrowRight", "modifiers": { "shift": true } },
//!   { "cmd": "key", "key": "b", "modifiers": { "ctrl": true } },
//!   { "cmd": "flip", "id": "$last", "axis": "horizontal" },
//!   { "cmd": "undo" }
//! ]
//! ```
//!
//! `$last` names the most recently added element, `$selected` the current
//! selection. The script is all-or-nothing: the first failing step aborts
//! it and nothing is saved.

use super::document::{resolve, DesignFile};
use crate::config::Config;
use anyhow::{anyhow, bail, Context, Result};
use artboard_editor::{
    EditSession, ElementDraft, ElementPatch, LayerDirection, Modifiers, MutationOutcome, ResizeEnd,
};
use artboard_model::{Background, Design, Face, FlipAxis};
use artboard_storage::{
    AutosaveSession, DesignKey, DesignStore, Envelope, FileDesignStore, MemoryDesignStore,
    PersistedDesign, PersistenceAdapter, SaveEvent, SaveScheduler,
};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Design document (<store dir>/<id>.json)
    pub file: PathBuf,

    /// JSON file with a list of edit steps
    pub script: PathBuf,

    /// Run the script against an in-memory copy; nothing is written
    #[arg(long)]
    pub dry_run: bool,
}

/// One gesture or command in an edit script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum Step {
    Add {
        element: ElementDraft,
    },
    Update {
        id: String,
        patch: ElementPatch,
    },
    Delete {
        id: String,
    },
    Reorder {
        id: String,
        direction: LayerDirection,
    },
    Flip {
        id: String,
        axis: FlipAxis,
    },
    Select {
        id: String,
    },
    ClickAt {
        x: f64,
        y: f64,
    },
    Deselect,
    MoveTo {
        id: String,
        x: f64,
        y: f64,
    },
    MoveBy {
        id: String,
        dx: f64,
        dy: f64,
    },
    Resize {
        id: String,
        to: ResizeEnd,
    },
    Rotate {
        id: String,
        degrees: f64,
    },
    EditText {
        id: String,
        content: String,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default, rename = "inputFocused")]
        input_focused: bool,
    },
    Undo,
    Redo,
    Face {
        face: Face,
    },
    Background {
        background: Background,
    },
    Zoom {
        percent: i64,
    },
}

pub fn parse_script(json: &str) -> Result<Vec<Step>> {
    serde_json::from_str(json).context("Edit scripts are a JSON array of steps")
}

/// Applies steps to a session, tracking the `$last` placeholder
#[derive(Debug, Default)]
pub struct ScriptRunner {
    last_added: Option<String>,
}

impl ScriptRunner {
    fn resolve(&self, session: &EditSession, id: &str) -> Result<String> {
        match id {
            "$last" => self
                .last_added
                .clone()
                .ok_or_else(|| anyhow!("$last used before any element was added")),
            "$selected" => session
                .selected_id()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("$selected used with nothing selected")),
            id => Ok(id.to_string()),
        }
    }

    /// Run one step; returns a line describing what happened
    pub fn run(&mut self, session: &mut EditSession, step: Step) -> Result<String> {
        let message = match step {
            Step::Add { element } => {
                let id = session.add_element(element)?;
                self.last_added = Some(id.clone());
                format!("added {}", id)
            }
            Step::Update { id, patch } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.update_element(&id, patch)?)
            }
            Step::Delete { id } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.delete_element(&id)?)
            }
            Step::Reorder { id, direction } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.reorder_layer(&id, direction)?)
            }
            Step::Flip { id, axis } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.flip(&id, axis)?)
            }
            Step::Select { id } => {
                let id = self.resolve(session, &id)?;
                session.click_element(&id);
                selection(session)
            }
            Step::ClickAt { x, y } => {
                session.click_at(x, y);
                selection(session)
            }
            Step::Deselect => {
                session.click_background();
                selection(session)
            }
            Step::MoveTo { id, x, y } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.move_to(&id, x, y)?)
            }
            Step::MoveBy { id, dx, dy } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.move_by(&id, dx, dy)?)
            }
            Step::Resize { id, to } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.resize(&id, to)?)
            }
            Step::Rotate { id, degrees } => {
                let id = self.resolve(session, &id)?;
                outcome(&session.rotate(&id, degrees)?)
            }
            Step::EditText { id, content } => {
                let id = self.resolve(session, &id)?;
                session.double_click(&id);
                if session.interaction().editing_id() != Some(id.as_str()) {
                    bail!("{} is not an editable text element", id);
                }
                match session.commit_inline_edit(&content)? {
                    Some(result) => outcome(&result),
                    None => "no change".to_string(),
                }
            }
            Step::Key {
                key,
                modifiers,
                input_focused,
            } => match session.key_down(&key, modifiers, input_focused)? {
                Some(result) => format!("{}: {}", key, outcome(&result)),
                None => format!("{}: {}", key, selection(session)),
            },
            Step::Undo => {
                if session.undo() {
                    "undone".to_string()
                } else {
                    "nothing to undo".to_string()
                }
            }
            Step::Redo => {
                if session.redo() {
                    "redone".to_string()
                } else {
                    "nothing to redo".to_string()
                }
            }
            Step::Face { face } => {
                session.set_active_face(face);
                format!("showing {:?}", face)
            }
            Step::Background { background } => {
                session.set_background(background);
                format!("background {}", session.canvas().background().to_css())
            }
            Step::Zoom { percent } => format!("zoom {}%", session.set_zoom(percent)),
        };
        Ok(message)
    }
}

fn outcome(outcome: &MutationOutcome) -> String {
    match outcome {
        MutationOutcome::Added { id } => format!("added {}", id),
        MutationOutcome::Updated { id } => format!("updated {}", id),
        MutationOutcome::Deleted { id } => format!("deleted {}", id),
        MutationOutcome::Noop { reason } => format!("no change ({})", reason),
    }
}

fn selection(session: &EditSession) -> String {
    match session.selected_id() {
        Some(id) => format!("selected {}", id),
        None => "nothing selected".to_string(),
    }
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = resolve(&args.file, cwd);
    let file = DesignFile::parse(&path)?;

    let script_path = resolve(&args.script, cwd);
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let steps = parse_script(&script)?;

    let runtime = tokio::runtime::Runtime::new()?;

    let store: Arc<dyn DesignStore> = if args.dry_run {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let envelope: Envelope<PersistedDesign> = serde_json::from_str(&text)?;
        let store = MemoryDesignStore::new();
        runtime.block_on(store.insert(file.design_id.clone(), envelope.data));
        Arc::new(store)
    } else {
        Arc::new(FileDesignStore::new(file.store_dir.clone()))
    };

    println!(
        "{} {} ({} steps)",
        "✏️".bright_blue(),
        path.display().to_string().bright_white(),
        steps.len()
    );

    let event = runtime.block_on(run_script(store, &config, &file.design_id, steps))?;

    match event {
        Some(SaveEvent::Saved { design_id, .. }) if args.dry_run => {
            println!("{} Dry run, {} left untouched", "✓".green(), design_id);
        }
        Some(SaveEvent::Saved { design_id, .. }) => {
            println!("{} Saved {}", "✅".green(), design_id.bright_white());
        }
        Some(SaveEvent::Failed { message, .. }) => bail!("Save failed: {}", message),
        None => println!("{}", "No changes to save".dimmed()),
    }
    Ok(())
}

async fn run_script(
    store: Arc<dyn DesignStore>,
    config: &Config,
    design_id: &str,
    steps: Vec<Step>,
) -> Result<Option<SaveEvent>> {
    let adapter = Arc::new(PersistenceAdapter::new(store));
    let (scheduler, _events) = SaveScheduler::new(adapter, config.save_debounce());
    let session = EditSession::with_history_limit(Design::default(), config.history_limit);
    let mut autosave = AutosaveSession::new(session, scheduler);

    autosave
        .load(&DesignKey::Design(design_id.to_string()))
        .await?;

    let mut runner = ScriptRunner::default();
    for (index, step) in steps.into_iter().enumerate() {
        match autosave.edit(|session| runner.run(session, step)) {
            Ok(message) => println!("  {} {}", format!("{:>3}", index + 1).dimmed(), message),
            Err(err) => {
                autosave.abandon();
                return Err(err.context(format!("Step {} failed, nothing saved", index + 1)));
            }
        }
    }

    Ok(autosave.flush().await)
}
