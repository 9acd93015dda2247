use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use report_engine::{SearchSettings, ServiceSettings};
use report_logging::{report_info, report_warn, LogDestination, DEFAULT_LOG_FILE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_FILE: &str = "report_studio.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub generation_base_url: String,
    pub directory_base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub search_quiet_period_ms: u64,
    pub search_limit: usize,
    pub search_timeout_secs: u64,
    /// Canonical page handed out by `share`; not specific to any report.
    pub share_url: String,
    pub output_dir: PathBuf,
    pub log_destination: LogTarget,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        let service = ServiceSettings::default();
        let search = SearchSettings::default();
        Self {
            generation_base_url: service.generation_base_url,
            directory_base_url: service.directory_base_url,
            connect_timeout_secs: service.connect_timeout.as_secs(),
            request_timeout_secs: service.request_timeout.as_secs(),
            max_response_bytes: service.max_bytes,
            search_quiet_period_ms: search.quiet_period.as_millis() as u64,
            search_limit: search.limit,
            search_timeout_secs: search.request_timeout.as_secs(),
            share_url: "https://reports.example.com/studio".to_string(),
            output_dir: PathBuf::from("reports"),
            log_destination: LogTarget::default(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppSettings {
    pub fn service(&self) -> ServiceSettings {
        ServiceSettings {
            generation_base_url: self.generation_base_url.clone(),
            directory_base_url: self.directory_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn search(&self) -> SearchSettings {
        SearchSettings {
            quiet_period: Duration::from_millis(self.search_quiet_period_ms),
            limit: self.search_limit.max(1),
            request_timeout: Duration::from_secs(self.search_timeout_secs),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Info)
    }
}

/// How the settings file was found. Reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsLoad {
    Loaded,
    Missing,
    Invalid(String),
}

impl SettingsLoad {
    pub fn log(&self, path: &Path) {
        match self {
            SettingsLoad::Loaded => report_info!("Loaded settings from {:?}", path),
            SettingsLoad::Missing => {
                report_info!("No settings file at {:?}; using defaults", path)
            }
            SettingsLoad::Invalid(err) => {
                report_warn!("Ignoring settings file {:?}: {}", path, err)
            }
        }
    }
}

pub fn load_or_default(path: &Path) -> (AppSettings, SettingsLoad) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppSettings::default(), SettingsLoad::Missing);
        }
        Err(err) => return (AppSettings::default(), SettingsLoad::Invalid(err.to_string())),
    };

    match ron::from_str::<AppSettings>(&content) {
        Ok(settings) => (settings, SettingsLoad::Loaded),
        Err(err) => (AppSettings::default(), SettingsLoad::Invalid(err.to_string())),
    }
}

pub fn to_ron(settings: &AppSettings) -> Result<String, ron::Error> {
    ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let (settings, load) = load_or_default(&temp.path().join("absent.ron"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(load, SettingsLoad::Missing);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report_studio.ron");
        fs::write(
            &path,
            r#"(generation_base_url: "https://gen.internal/api", search_limit: 3, log_destination: Both)"#,
        )
        .unwrap();

        let (settings, load) = load_or_default(&path);
        assert_eq!(load, SettingsLoad::Loaded);
        assert_eq!(settings.generation_base_url, "https://gen.internal/api");
        assert_eq!(settings.search().limit, 3);
        assert_eq!(settings.log_destination, LogTarget::Both);
        assert_eq!(settings.service().request_timeout, Duration::from_secs(180));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.ron");
        fs::write(&path, "(search_limit: \"many\"").unwrap();

        let (settings, load) = load_or_default(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(matches!(load, SettingsLoad::Invalid(_)));
    }

    #[test]
    fn written_settings_load_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("roundtrip.ron");
        let mut settings = AppSettings::default();
        settings.share_url = "https://example.org/share".to_string();
        fs::write(&path, to_ron(&settings).unwrap()).unwrap();

        assert_eq!(load_or_default(&path).0, settings);
    }

    #[test]
    fn unknown_log_level_means_info() {
        let settings = AppSettings {
            log_level: "chatty".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.log_level(), LevelFilter::Info);
    }
}
