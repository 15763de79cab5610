//! Client settings: defaults, then `student_portal.toml`, then environment.

use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;

use crate::remote::DEFAULT_REMOTE_USERS_URL;

pub const SETTINGS_FILE: &str = "student_portal.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub database_url: String,
    pub remote_users_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/student_portal.db".into(),
            remote_users_url: DEFAULT_REMOTE_USERS_URL.into(),
            request_timeout_secs: 10,
            log_filter: "info".into(),
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn remote_url(&self) -> anyhow::Result<url::Url> {
        url::Url::parse(&self.remote_users_url)
            .with_context(|| format!("invalid remote users url '{}'", self.remote_users_url))
    }

    fn apply_file_values(&mut self, file_cfg: &HashMap<String, String>) {
        if let Some(v) = file_cfg.get("database_url") {
            self.database_url = v.clone();
        }
        if let Some(v) = file_cfg.get("remote_users_url") {
            self.remote_users_url = v.clone();
        }
        if let Some(parsed) = file_cfg
            .get("request_timeout_secs")
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.request_timeout_secs = parsed;
        }
        if let Some(v) = file_cfg.get("log_filter") {
            self.log_filter = v.clone();
        }
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DATABASE_URL") {
            self.database_url = v;
        }
        if let Some(v) = lookup("APP__DATABASE_URL") {
            self.database_url = v;
        }

        if let Some(v) = lookup("REMOTE_USERS_URL") {
            self.remote_users_url = v;
        }
        if let Some(v) = lookup("APP__REMOTE_USERS_URL") {
            self.remote_users_url = v;
        }

        if let Some(parsed) =
            lookup("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok())
        {
            self.request_timeout_secs = parsed;
        }

        if let Some(v) = lookup("RUST_LOG") {
            self.log_filter = v;
        }
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from<F>(settings_path: &Path, lookup: F) -> ClientSettings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(settings_path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => settings.apply_file_values(&file_cfg),
            Err(err) => tracing::warn!(
                path = %settings_path.display(),
                "ignoring unreadable settings file: {err}"
            ),
        }
    }

    settings.apply_env(|name| lookup(name).filter(|v| !v.trim().is_empty()));
    settings
}

/// Turns bare file paths and Windows paths into sqlite urls. The parent
/// directory is created later by `storage::Storage::new`.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return ClientSettings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:") {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite://") {
        if is_windows_drive_path(path) {
            return format!("sqlite:{}", path.replace('\\', "/"));
        }
        return raw_database_url.to_string();
    }

    if raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite:{path}");
    }

    let path = raw_database_url.replace('\\', "/");
    if is_windows_drive_path(&path) {
        return format!("sqlite:{path}");
    }
    format!("sqlite://{path}")
}

fn is_windows_drive_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
