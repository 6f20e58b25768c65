// Application Configuration
// Defaults compiled from config.yaml at build time, overridable at runtime
// from widget-dashboard.yaml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

/// Allowed range for `ui.card_width`
pub const MIN_CARD_WIDTH: u16 = 8;
pub const MAX_CARD_WIDTH: u16 = 200;

/// Runtime config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "widget-dashboard.yaml";

/// Resolved configuration for widget-dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Category API settings
    pub api: ApiSettings,

    /// UI and display settings
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    /// Root URL of the categories API
    pub base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiSettings {
    /// Header title
    pub title: String,

    /// How long a toast stays on screen
    pub toast_duration: Duration,

    /// Width of the "Add Widget" side panel, in columns
    pub drawer_width: u16,

    /// Width of a widget card, in columns
    pub card_width: u16,

    /// Event poll interval of the main loop
    pub tick_rate: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: compiled::API_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(compiled::REQUEST_TIMEOUT_MS),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: compiled::TITLE.to_string(),
            toast_duration: Duration::from_millis(compiled::TOAST_DURATION_MS),
            drawer_width: compiled::DRAWER_WIDTH,
            card_width: compiled::CARD_WIDTH,
            tick_rate: Duration::from_millis(compiled::TICK_RATE_MS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// On-disk layout of widget-dashboard.yaml; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiSection {
    pub title: Option<String>,
    pub toast_duration_ms: Option<u64>,
    pub drawer_width: Option<u16>,
    pub card_width: Option<u16>,
    pub tick_rate_ms: Option<u64>,
}

impl ConfigFile {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty file is a valid "no overrides" file
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

impl AppConfig {
    /// Resolve configuration from compiled defaults and an optional file
    ///
    /// An explicit `path` must exist. Without one, `widget-dashboard.yaml`
    /// in `search_dir` is used when present.
    pub fn load(path: Option<&Path>, search_dir: &Path) -> Result<Self> {
        let file = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => {
                let default_path = search_dir.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Some(ConfigFile::load(&default_path)?)
                } else {
                    None
                }
            }
        };

        let mut config = Self::default();
        if let Some(file) = file {
            config.apply(file);
        }
        Ok(config)
    }

    /// Overlay the values set in `file`
    pub fn apply(&mut self, file: ConfigFile) {
        let ConfigFile { api, ui } = file;

        if let Some(base_url) = api.base_url {
            self.api.base_url = base_url;
        }
        if let Some(ms) = api.request_timeout_ms {
            self.api.request_timeout = Duration::from_millis(ms);
        }

        if let Some(title) = ui.title {
            self.ui.title = title;
        }
        if let Some(ms) = ui.toast_duration_ms {
            self.ui.toast_duration = Duration::from_millis(ms);
        }
        if let Some(width) = ui.drawer_width {
            self.ui.drawer_width = width;
        }
        if let Some(width) = ui.card_width {
            self.ui.card_width = width.clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);
        }
        if let Some(ms) = ui.tick_rate_ms {
            self.ui.tick_rate = Duration::from_millis(ms.max(1));
        }
    }
}
