use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Application settings, persisted as settings.json.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Marker class the page renderer puts on alert containers.
    pub alert_class: String,
    /// Polling cadence of the runtime loop in milliseconds. Does not affect
    /// the dismissal delay, which is a hard constant.
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alert_class: "alert".to_string(),
            tick_interval_ms: 100,
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(app_config_dir: PathBuf) -> Self {
        Self {
            config_path: app_config_dir.join("settings.json"),
        }
    }

    pub fn load(&self) -> Settings {
        if self.config_path.exists() {
            if let Ok(content) = fs::read_to_string(&self.config_path) {
                if let Ok(settings) = serde_json::from_str(&content) {
                    return settings;
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.config_path, content)
    }
}
