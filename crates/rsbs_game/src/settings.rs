//! Process-level settings, read from the environment.
//!
//! - `RSBS_PRESET`: `console-legacy`, `console-modern` or `desktop` (default)
//! - `RSBS_CONFIG`: JSON config file; wins over `RSBS_PRESET`
//! - `RSBS_ASSET_ROOT`: directory holding `res/` for the desktop layout
//! - `RSBS_REPLAY`: replay file; runs headless instead of opening a window

use std::path::PathBuf;

use rsbs_core::config::{load_config_from_path, LoopConfig, Preset};

use crate::error::SetupError;

pub const PRESET_VAR: &str = "RSBS_PRESET";
pub const CONFIG_VAR: &str = "RSBS_CONFIG";
pub const ASSET_ROOT_VAR: &str = "RSBS_ASSET_ROOT";
pub const REPLAY_VAR: &str = "RSBS_REPLAY";

#[derive(Debug, Clone)]
pub struct Settings {
    pub config: LoopConfig,
    pub config_source: String,
    pub asset_root: Option<PathBuf>,
    pub replay: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, SetupError> {
        let non_empty = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        let (config, config_source) = match non_empty(CONFIG_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                let config = load_config_from_path(&path).map_err(SetupError::Config)?;
                (config, format!("file {}", path.display()))
            }
            None => {
                let preset = match non_empty(PRESET_VAR) {
                    Some(name) => name.parse::<Preset>().map_err(SetupError::Config)?,
                    None => Preset::default(),
                };
                (LoopConfig::preset(preset), format!("preset {preset}"))
            }
        };

        Ok(Self {
            config,
            config_source,
            asset_root: non_empty(ASSET_ROOT_VAR).map(PathBuf::from),
            replay: non_empty(REPLAY_VAR).map(PathBuf::from),
        })
    }
}
