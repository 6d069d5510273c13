use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use shelf_engine::EngineConfig;
use shelf_logging::{shelf_info, shelf_warn};

pub(crate) const SETTINGS_FILENAME: &str = ".shelf_settings.ron";

/// Optional overrides read from `.shelf_settings.ron`; absent fields keep defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub output_dir: Option<PathBuf>,
    pub metadata_base_url: Option<String>,
    pub price_min_delay_ms: Option<u64>,
    pub price_max_delay_ms: Option<u64>,
    pub scan_timeout_secs: Option<u64>,
    pub log_to_terminal: bool,
}

impl AppSettings {
    pub(crate) fn output_dir(&self, working_dir: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => working_dir.join(dir),
            None => working_dir.join("output"),
        }
    }

    pub(crate) fn apply(&self, config: &mut EngineConfig) {
        if let Some(url) = &self.metadata_base_url {
            config.metadata.base_url = url.clone();
        }
        if let Some(ms) = self.price_min_delay_ms {
            config.price.min_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.price_max_delay_ms {
            config.price.max_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = self.scan_timeout_secs {
            config.scan_timeout = Some(Duration::from_secs(secs));
        }
    }
}

pub(crate) fn load_settings(dir: &Path) -> AppSettings {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppSettings::default();
        }
        Err(err) => {
            shelf_warn!("Failed to read settings from {:?}: {}", path, err);
            return AppSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            shelf_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            shelf_warn!("Failed to parse settings from {:?}: {}", path, err);
            AppSettings::default()
        }
    }
}
