use crate::api::chat::DEFAULT_CHAT_PATH;
use crate::core::error::ChatError;
use crate::widget::WidgetSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Used when no usable http(s) origin is configured.
pub const FALLBACK_ORIGIN: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub chat_path: String,
    pub specialist: String,
    pub max_message_length: usize,
    pub max_input_height: u32,
    pub toast_duration_ms: u64,
    pub auth_redirect_delay_ms: u64,
    pub logout_delay_ms: u64,
    pub download_dir: Option<PathBuf>,
    /// Sent with every request, e.g. a `Cookie` carrying the login session.
    pub headers: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = WidgetSettings::default();
        Self {
            base_url: None,
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            specialist: "general".to_string(),
            max_message_length: settings.max_message_length,
            max_input_height: settings.max_input_height,
            toast_duration_ms: settings.toast_duration.as_millis() as u64,
            auth_redirect_delay_ms: settings.auth_redirect_delay.as_millis() as u64,
            logout_delay_ms: settings.logout_delay.as_millis() as u64,
            download_dir: None,
            headers: HashMap::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join(".jpia.yaml")
    }

    /// Reads a config file. A missing file is not an error and yields defaults.
    pub fn load_from(path: &Path) -> Result<Config, ChatError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Like [`Config::load_from`], but logs failures and falls back to defaults.
    pub fn load(path: Option<&Path>) -> Config {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config at {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn origin(&self) -> String {
        resolve_origin(self.base_url.as_deref())
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn widget_settings(&self) -> WidgetSettings {
        WidgetSettings {
            max_message_length: self.max_message_length,
            max_input_height: self.max_input_height,
            toast_duration: Duration::from_millis(self.toast_duration_ms),
            auth_redirect_delay: Duration::from_millis(self.auth_redirect_delay_ms),
            logout_delay: Duration::from_millis(self.logout_delay_ms),
        }
    }
}

/// An http(s) origin is used as given. Anything else (absent, `file:`) falls back to the
/// local server.
pub fn resolve_origin(base_url: Option<&str>) -> String {
    match base_url.map(str::trim) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            url.trim_end_matches('/').to_string()
        }
        _ => FALLBACK_ORIGIN.to_string(),
    }
}
