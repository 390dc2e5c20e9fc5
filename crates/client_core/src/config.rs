use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "splitter.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub download_dir: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: 120,
            download_dir: PathBuf::from("./pages"),
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    download_dir: Option<PathBuf>,
}

/// Defaults, then `splitter.toml` in the working directory, then the
/// process environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
                if let Some(v) = file_cfg.download_dir {
                    settings.download_dir = v;
                }
            }
            Err(err) => warn!(path = %path.display(), "ignoring unreadable settings file: {err}"),
        }
    }

    // APP__ names win over SPLITTER_ names when both are set.
    for key in ["SPLITTER_SERVER_URL", "APP__SERVER_URL"] {
        if let Some(v) = env(key) {
            settings.server_url = v;
        }
    }
    for key in ["SPLITTER_REQUEST_TIMEOUT_SECS", "APP__REQUEST_TIMEOUT_SECS"] {
        if let Some(v) = env(key) {
            match v.parse::<u64>() {
                Ok(parsed) => settings.request_timeout_secs = parsed,
                Err(_) => warn!(key, value = %v, "ignoring non-numeric timeout override"),
            }
        }
    }
    for key in ["SPLITTER_DOWNLOAD_DIR", "APP__DOWNLOAD_DIR"] {
        if let Some(v) = env(key) {
            settings.download_dir = PathBuf::from(v);
        }
    }

    settings
}
