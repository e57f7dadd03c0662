use artboard_model::{CanvasShape, CanvasSize, CanvasState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "artboard.config.json";

/// Artboard configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the design documents
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Quiet period before an edit is saved
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,

    /// Undo depth
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Artboard used by `init`
    #[serde(default)]
    pub default_canvas: CanvasOption,
}

fn default_store_dir() -> String {
    "designs".to_string()
}

fn default_save_debounce_ms() -> u64 {
    1000
}

fn default_history_limit() -> usize {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasOption {
    pub width: f64,
    pub height: f64,
    pub shape: CanvasShape,
}

impl Default for CanvasOption {
    fn default() -> Self {
        let size = CanvasSize::default();
        Self {
            width: size.width,
            height: size.height,
            shape: CanvasShape::default(),
        }
    }
}

impl CanvasOption {
    pub fn to_canvas(&self) -> CanvasState {
        CanvasState::new(
            CanvasSize {
                width: self.width,
                height: self.height,
            },
            self.shape,
        )
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        Path::new(cwd).join(&self.store_dir)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            save_debounce_ms: default_save_debounce_ms(),
            history_limit: default_history_limit(),
            default_canvas: CanvasOption::default(),
        }
    }
}
