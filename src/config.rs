use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::app_dirs::AppDirs;

pub const DEFAULT_TICK_RATE_MS: u64 = 100;
pub const MIN_TICK_RATE_MS: u64 = 10;

/// User preferences kept between runs. Games themselves are never saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Custom JSON word list used instead of the built-in one.
    pub words_file: Option<PathBuf>,
    pub celebrate: bool,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_file: None,
            celebrate: true,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Config {
    /// The animation tick. Zero means unset; anything else is held to
    /// at least `MIN_TICK_RATE_MS`.
    pub fn tick_rate(&self) -> Duration {
        let ms = match self.tick_rate_ms {
            0 => DEFAULT_TICK_RATE_MS,
            ms => ms.max(MIN_TICK_RATE_MS),
        };
        Duration::from_millis(ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Falls back to defaults when the file is missing or unreadable.
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no config file, using defaults");
                return Config::default();
            }
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}
