use log::{error, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::project_root::DEFAULT_MARKER_DIR;

pub const CONFIG_RES_PATH: &str = "res://addons/godot-components/config.json";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PluginConfig {
    pub default_icon_path: String,
    pub resource_scheme: String,
    pub marker_dir_name: String,
    pub log_level: String,
    pub components: Vec<ComponentEntry>,
}

/// A component listed in the config. `base` is the immediate base class.
#[derive(Default, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ComponentEntry {
    pub name: String,
    pub base: String,
    #[serde(alias = "script")]
    pub script_path: String,
    #[serde(alias = "icon")]
    pub icon_path: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> PluginConfig {
        PluginConfig {
            default_icon_path: "res://addons/godot-components/component_white.png".to_string(),
            resource_scheme: "res://".to_string(),
            marker_dir_name: DEFAULT_MARKER_DIR.to_string(),
            log_level: "info".to_string(),
            components: Vec::new(),
        }
    }
}

impl PluginConfig {
    /// Reads the config at `path`. A missing file means defaults; a broken
    /// one is logged and also means defaults. Nothing is written back.
    pub fn from_config_file(path: &Path) -> PluginConfig {
        if path.exists() {
            info!("config file {:?} exists, reading", path);
            match PluginConfig::read(path) {
                Ok(config) => config,
                Err(err) => {
                    error!("{} ({:?}), using default", err, path);
                    PluginConfig::default()
                }
            }
        } else {
            info!("config file {:?} does not exist, using default", path);
            PluginConfig::default()
        }
    }

    fn read(path: &Path) -> Result<PluginConfig, ConfigError> {
        let s = fs::read_to_string(path)?;
        Ok(serde_json::from_str::<PluginConfig>(&s)?)
    }

    pub fn level_filter(&self) -> LevelFilter {
        match LevelFilter::from_str(&self.log_level) {
            Ok(level) => level,
            Err(_) => {
                error!("unknown log_level {:?}, using info", self.log_level);
                LevelFilter::Info
            }
        }
    }
}
