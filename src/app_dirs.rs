use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "endgame";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("endgame_config.json"))
    }

    /// Log file lives next to other local state, e.g. `~/.local/state/endgame`.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("endgame.log"))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join("endgame.log"))
        }
    }
}
